//! VGA text attribute byte
//!
//! Layout: bits 0-3 foreground, bits 4-6 background, bit 7 blink
//! (or bright background, depending on the adapter mode).

use bitflags::bitflags;

/// VGA color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    pub const fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::Pink,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

bitflags! {
    /// Single-bit modifiers inside the attribute byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttrFlags: u8 {
        /// High-intensity foreground
        const BRIGHT = 0x08;
        /// Blinking character
        const BLINK = 0x80;
    }
}

/// Attribute byte of a text cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    /// Light gray on black, the console default
    pub const DEFAULT: Attribute = Attribute::new(Color::LightGray, Color::Black);

    pub const fn new(foreground: Color, background: Color) -> Self {
        Self(((background as u8) & 0x07) << 4 | (foreground as u8))
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0)
    }

    pub const fn background(self) -> Color {
        Color::from_nibble((self.0 >> 4) & 0x07)
    }

    pub const fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_truncate(self.0)
    }

    pub const fn with(self, flags: AttrFlags) -> Self {
        Self(self.0 | flags.bits())
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light_gray_on_black() {
        assert_eq!(Attribute::DEFAULT.bits(), 0x07);
        assert_eq!(Attribute::DEFAULT.foreground(), Color::LightGray);
        assert_eq!(Attribute::DEFAULT.background(), Color::Black);
    }

    #[test]
    fn test_color_encoding() {
        assert_eq!(Attribute::new(Color::White, Color::Black).bits(), 0x0F);
        assert_eq!(Attribute::new(Color::Yellow, Color::Blue).bits(), 0x1E);
        // Background only has three bits
        assert_eq!(Attribute::new(Color::Black, Color::White).bits(), 0x70);
    }

    #[test]
    fn test_flags() {
        let blinking = Attribute::DEFAULT.with(AttrFlags::BLINK);
        assert_eq!(blinking.bits(), 0x87);
        assert!(blinking.flags().contains(AttrFlags::BLINK));
        assert!(!blinking.flags().contains(AttrFlags::BRIGHT));

        assert!(Attribute::new(Color::White, Color::Black)
            .flags()
            .contains(AttrFlags::BRIGHT));
    }
}

//! VGA text-mode console
//!
//! Writes (character, attribute) pairs straight into the 80x25 text buffer.
//! Control bytes are not interpreted: every byte becomes a glyph.
//!
//! Cursor policy:
//! - The cursor is a cell index in `0..CELL_COUNT`
//! - Advancing past the last cell wraps to cell 0 (no scrolling)
//! - `clear_screen` homes the cursor to cell 0

use core::mem::size_of;
use static_assertions::const_assert_eq;

use super::{Attribute, Console, ConsoleError};
use crate::hal::RegisterBlock;

/// Physical address of the color text buffer
pub const VGA_BUFFER_ADDR: usize = 0xB8000;
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;
pub const CELL_COUNT: usize = VGA_WIDTH * VGA_HEIGHT;
pub const BYTES_PER_CELL: usize = 2;
pub const VGA_BUFFER_SIZE: usize = CELL_COUNT * BYTES_PER_CELL;

/// One screen cell as laid out in video memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct TextCell {
    pub character: u8,
    pub attribute: Attribute,
}

const_assert_eq!(size_of::<TextCell>(), BYTES_PER_CELL);

impl TextCell {
    pub const fn new(character: u8, attribute: Attribute) -> Self {
        Self {
            character,
            attribute,
        }
    }

    pub const fn blank(attribute: Attribute) -> Self {
        Self::new(b' ', attribute)
    }
}

/// Text console over a byte-wide register block
pub struct VgaConsole<B: RegisterBlock<u8>> {
    buffer: B,
    cursor: usize,
    attribute: Attribute,
}

impl<B: RegisterBlock<u8>> VgaConsole<B> {
    /// Wrap a text buffer using the default light-gray-on-black attribute
    ///
    /// The cursor starts at cell 0; the buffer contents are left alone.
    pub fn new(buffer: B) -> Result<Self, ConsoleError> {
        Self::with_attribute(buffer, Attribute::DEFAULT)
    }

    pub fn with_attribute(buffer: B, attribute: Attribute) -> Result<Self, ConsoleError> {
        if buffer.len() < VGA_BUFFER_SIZE {
            return Err(ConsoleError::BufferTooSmall {
                required: VGA_BUFFER_SIZE,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            buffer,
            cursor: 0,
            attribute,
        })
    }

    /// Current cursor cell index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current cursor as (row, column)
    pub fn position(&self) -> (usize, usize) {
        (self.cursor / VGA_WIDTH, self.cursor % VGA_WIDTH)
    }

    /// Move the cursor to (row, column)
    pub fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), ConsoleError> {
        if row >= VGA_HEIGHT || col >= VGA_WIDTH {
            return Err(ConsoleError::CursorOutOfBounds { row, col });
        }
        self.cursor = row * VGA_WIDTH + col;
        Ok(())
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Read back a cell
    ///
    /// # Panics
    /// If `index >= CELL_COUNT`.
    pub fn cell(&self, index: usize) -> TextCell {
        assert!(index < CELL_COUNT, "cell {} off screen", index);
        let offset = index * BYTES_PER_CELL;
        TextCell::new(
            self.buffer.read(offset),
            Attribute::from_bits(self.buffer.read(offset + 1)),
        )
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    #[inline]
    fn write_cell(&mut self, index: usize, cell: TextCell) {
        let offset = index * BYTES_PER_CELL;
        // Character first, then attribute
        self.buffer.write(offset, cell.character);
        self.buffer.write(offset + 1, cell.attribute.bits());
    }
}

impl<B: RegisterBlock<u8>> Console for VgaConsole<B> {
    fn print_char(&mut self, c: u8) {
        self.write_cell(self.cursor, TextCell::new(c, self.attribute));
        self.cursor = (self.cursor + 1) % CELL_COUNT;
    }

    fn clear_screen(&mut self) {
        let blank = TextCell::blank(self.attribute);
        for index in 0..CELL_COUNT {
            self.write_cell(index, blank);
        }
        self.cursor = 0;
    }
}

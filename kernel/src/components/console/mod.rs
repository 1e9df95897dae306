//! Console component trait
//!
//! Provides the minimal text output interface used by boot and the command
//! dispatcher. Three implementations are selected at compile time:
//! - [`vga::VgaConsole`]: 80x25 text buffer (x86_64)
//! - [`pl011::Pl011Console`]: PL011 UART (Raspberry Pi, debug output)
//! - [`null::NullConsole`]: discards output

use core::fmt;
use thiserror::Error;

/// Console configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("text buffer holds {actual} bytes, {required} required")]
    BufferTooSmall { required: usize, actual: usize },

    #[error("cursor position ({row}, {col}) is off screen")]
    CursorOutOfBounds { row: usize, col: usize },
}

/// Console trait for text output
///
/// Operations are total: they never fail once the console exists.
pub trait Console {
    /// Write a single character at the cursor and advance it
    fn print_char(&mut self, c: u8);

    /// Write bytes up to (not including) the first NUL
    ///
    /// Lazily feeds `print_char`; cursor state carries over between calls.
    fn print_string(&mut self, s: &[u8]) {
        for &byte in s.iter().take_while(|&&b| b != 0) {
            self.print_char(byte);
        }
    }

    /// Write a Rust string
    fn print_str(&mut self, s: &str) {
        self.print_string(s.as_bytes());
    }

    /// Blank the output device and home the cursor
    ///
    /// Streams have nothing to clear, so the default is a no-op.
    fn clear_screen(&mut self) {}
}

/// Wrapper for using a Console with `core::fmt::Write`
pub struct ConsoleWriter<'a, C: Console + ?Sized> {
    console: &'a mut C,
}

impl<'a, C: Console + ?Sized> ConsoleWriter<'a, C> {
    pub fn new(console: &'a mut C) -> Self {
        Self { console }
    }
}

impl<C: Console + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.print_str(s);
        Ok(())
    }
}

// Component implementations
pub mod attribute;
pub mod null;
pub mod pl011;
pub mod vga;

pub use attribute::{AttrFlags, Attribute, Color};


#[cfg(test)]
mod tests {
    use super::testing::RecordingConsole;
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_print_string_stops_at_nul() {
        let mut console = RecordingConsole::default();
        console.print_string(b"abc\0def");
        assert_eq!(console.output, b"abc");
    }

    #[test]
    fn test_print_string_without_terminator_prints_everything() {
        let mut console = RecordingConsole::default();
        console.print_string(b"hello");
        console.print_string(b"");
        console.print_str(" world");
        assert_eq!(console.text(), "hello world");
    }

    #[test]
    fn test_console_writer_formats() {
        let mut console = RecordingConsole::default();
        write!(ConsoleWriter::new(&mut console), "sector {} of {}", 2, 32).unwrap();
        assert_eq!(console.text(), "sector 2 of 32");
    }
}

//! Null console component (no output)
//!
//! Used when a build has no display or when log output is not wanted.
//! All output operations are no-ops.

use super::Console;

/// Console that discards all output
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsole;

impl NullConsole {
    pub const fn new() -> Self {
        Self
    }
}

impl Console for NullConsole {
    #[inline(always)]
    fn print_char(&mut self, _c: u8) {}

    #[inline(always)]
    fn print_string(&mut self, _s: &[u8]) {}
}

//! In-memory register block for tests and simulation

use super::{RegisterBlock, Word};

/// Register block backed by an array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimBlock<W: Word, const N: usize> {
    regs: [W; N],
}

impl<W: Word, const N: usize> SimBlock<W, N> {
    /// All registers zero
    pub const fn new() -> Self {
        Self { regs: [W::ZERO; N] }
    }

    pub const fn from_array(regs: [W; N]) -> Self {
        Self { regs }
    }

    pub fn as_slice(&self) -> &[W] {
        &self.regs
    }
}

impl<W: Word, const N: usize> Default for SimBlock<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word, const N: usize> RegisterBlock<W> for SimBlock<W, N> {
    fn len(&self) -> usize {
        N
    }

    fn read(&self, index: usize) -> W {
        self.regs[index]
    }

    fn write(&mut self, index: usize, value: W) {
        self.regs[index] = value;
    }
}

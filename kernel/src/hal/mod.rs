//! Hardware register interface
//!
//! Device registers are modelled as a [`RegisterBlock`]: a base address
//! viewed as an array of fixed-width registers. Drivers are written against
//! the trait so the same code runs on real MMIO ([`MmioBlock`]) and on an
//! in-memory backing store ([`SimBlock`]) in tests.
//!
//! # Invariants
//! - Every access goes through volatile reads/writes on real hardware
//! - `set_bits` is read-modify-write: bits outside `mask` are preserved
//! - Indices are bounds-checked; an out-of-range index is a caller bug and
//!   panics (the panic handler halts the machine)

use core::fmt;
use core::ops::{BitAnd, BitOr, Not};

pub mod mmio;
pub mod sim;

pub use mmio::MmioBlock;
pub use sim::SimBlock;

/// Register width
pub trait Word:
    Copy
    + Eq
    + fmt::Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Send
    + 'static
{
    const ZERO: Self;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {
        $(impl Word for $ty {
            const ZERO: Self = 0;
        })*
    };
}

impl_word!(u8, u16, u32, u64);

/// A block of device registers of width `W`
pub trait RegisterBlock<W: Word> {
    /// Number of registers in the block
    fn len(&self) -> usize;

    /// Read register `index`
    fn read(&self, index: usize) -> W;

    /// Write `value` to register `index`
    fn write(&mut self, index: usize, value: W);

    /// Replace the bits selected by `mask` with the same bits of `value`
    ///
    /// Result: `(current & !mask) | (value & mask)`
    fn set_bits(&mut self, index: usize, mask: W, value: W) {
        let current = self.read(index);
        self.write(index, (current & !mask) | (value & mask));
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Volatile register block at a physical address

use core::marker::PhantomData;
use core::ptr;

use super::{RegisterBlock, Word};

/// Memory-mapped register block
///
/// # Safety
/// This type dereferences `base` directly. Construction is `unsafe`: the
/// caller guarantees the region `[base, base + len * size_of::<W>())` is
/// mapped device memory (or otherwise valid, aligned memory) for the
/// lifetime of the block and is not aliased by another owner.
pub struct MmioBlock<W: Word> {
    base: usize,
    len: usize,
    _width: PhantomData<W>,
}

impl<W: Word> MmioBlock<W> {
    /// Create a block of `len` registers at `base`
    ///
    /// # Safety
    /// See the type-level safety section.
    pub const unsafe fn new(base: usize, len: usize) -> Self {
        Self {
            base,
            len,
            _width: PhantomData,
        }
    }

    /// Physical base address
    pub const fn base(&self) -> usize {
        self.base
    }

    #[inline]
    fn register(&self, index: usize) -> *mut W {
        assert!(
            index < self.len,
            "register index {} out of range for block at {:#x} ({} registers)",
            index,
            self.base,
            self.len
        );
        (self.base as *mut W).wrapping_add(index)
    }
}

impl<W: Word> RegisterBlock<W> for MmioBlock<W> {
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn read(&self, index: usize) -> W {
        // SAFETY: index checked above, region validity promised by `new`
        unsafe { ptr::read_volatile(self.register(index)) }
    }

    #[inline]
    fn write(&mut self, index: usize, value: W) {
        // SAFETY: index checked above, region validity promised by `new`
        unsafe { ptr::write_volatile(self.register(index), value) }
    }
}

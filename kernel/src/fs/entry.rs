//! Catalog records and content block views

use core::mem::size_of;
use core::ops::Range;
use static_assertions::const_assert_eq;

use super::name::{FileName, NAME_LEN};
use super::SECTOR_SIZE;

/// One fixed-width catalog record
///
/// Layout: 11-byte name, 1 reserved byte, start sector, sector count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct CatalogEntry {
    name: FileName,
    _reserved: u8,
    start_sector: u16,
    sector_count: u16,
}

const_assert_eq!(size_of::<CatalogEntry>(), 16);

impl CatalogEntry {
    pub const fn new(name: [u8; NAME_LEN], start_sector: u16, sector_count: u16) -> Self {
        Self {
            name: FileName::from_raw(name),
            _reserved: 0,
            start_sector,
            sector_count,
        }
    }

    pub const fn name(&self) -> &FileName {
        &self.name
    }

    pub const fn start_sector(&self) -> u16 {
        self.start_sector
    }

    pub const fn sector_count(&self) -> u16 {
        self.sector_count
    }

    /// Sectors occupied, as a half-open range
    pub const fn sectors(&self) -> Range<u32> {
        let start = self.start_sector as u32;
        start..start + self.sector_count as u32
    }

    /// View of this entry's bytes in the catalog image
    pub const fn block(&self) -> ContentBlock {
        ContentBlock {
            offset: self.start_sector as usize * SECTOR_SIZE,
            len: self.sector_count as usize * SECTOR_SIZE,
        }
    }
}

/// Offset and length of a file's bytes inside the catalog image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBlock {
    offset: usize,
    len: usize,
}

impl ContentBlock {
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

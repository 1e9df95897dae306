//! Static file catalog
//!
//! A read-only directory compiled into the kernel image. Two halves:
//! - a table of 16-byte [`CatalogEntry`] records (name, start sector,
//!   sector count), generated at build time by `catalog-pack`
//! - a sector-addressed image holding the file contents; sector 1 of the
//!   image is the [`SectorMap`]
//!
//! Nothing here is ever created, mutated or freed at runtime.
//!
//! # Addressing
//! A file's content block is `[start * SECTOR_SIZE, (start + count) *
//! SECTOR_SIZE)` from the image start. Sector numbers are 0-based.

use thiserror::Error;

pub mod catalog;
pub mod entry;
pub mod name;
pub mod sector_map;

pub use catalog::Catalog;
pub use entry::{CatalogEntry, ContentBlock};
pub use name::{FileName, NAME_LEN};
pub use sector_map::{SectorMap, SectorState};

/// Bytes per sector
pub const SECTOR_SIZE: usize = 512;

mod generated {
    use super::entry::CatalogEntry;

    include!(concat!(env!("OUT_DIR"), "/catalog_table.rs"));

    pub(crate) static IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/catalog_image.bin"));
}

/// Sectors in the compiled-in catalog image
pub const BUILTIN_TOTAL_SECTORS: u16 = generated::GENERATED_TOTAL_SECTORS;

/// First sector the build placed file contents in
pub const BUILTIN_FIRST_DATA_SECTOR: u16 = generated::GENERATED_FIRST_DATA_SECTOR;

/// Catalog errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Lookup miss; the caller reports it and carries on
    #[error("file not found")]
    NameNotFound,

    #[error("invalid file name")]
    InvalidName,

    #[error("duplicate catalog entry {0}")]
    DuplicateName(FileName),

    #[error("{name} overlaps the sectors of {other}")]
    Overlap { name: FileName, other: FileName },

    #[error("{name} extends past the end of the image")]
    OutOfImage { name: FileName },

    #[error("sector chain broken at sector {sector}")]
    BrokenChain { sector: u16 },
}

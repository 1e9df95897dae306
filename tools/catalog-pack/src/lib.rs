//! Catalog packer for PicoKern
//!
//! # Purpose
//! The kernel carries its file catalog compiled in: a table of fixed-size
//! records plus a sector-addressed image holding the file contents. This
//! crate turns a TOML manifest into both halves. It runs inside the kernel's
//! `build.rs` and as the `catalog-pack` CLI, which also assembles bootable
//! disk images.
//!
//! # Image layout
//! - Sector 0: boot sector (zeroed in the catalog image, bootloader on disk)
//! - Sector 1: sector map, one byte per sector
//! - Sector 2..: file contents, each file NUL terminated and padded to a
//!   whole number of sectors

pub mod disk;
pub mod emit;
pub mod error;
pub mod layout;
pub mod manifest;

pub use disk::{assemble, DiskImage};
pub use error::{PackError, Result};
pub use layout::{Geometry, Layout, PlacedFile};
pub use manifest::{FileSpec, Manifest, SourceFile};

/// Bytes per sector
pub const SECTOR_SIZE: usize = 512;

/// Width of the padded name field of a catalog record
pub const NAME_LEN: usize = 11;

/// Sector holding the sector map
pub const MAP_SECTOR: u16 = 1;

/// Sectors before the data region (boot sector and sector map)
pub const RESERVED_SECTORS: u16 = 2;

/// Largest image the one-byte sector map can describe
pub const MAX_SECTORS: u16 = 254;

/// Sector map marker: unused sector
pub const MAP_FREE: u8 = 0x00;

/// Sector map marker: boot sector or the map itself
pub const MAP_RESERVED: u8 = 0xFE;

/// Sector map marker: last sector of a file
pub const MAP_END_OF_CHAIN: u8 = 0xFF;

//! Error types for catalog packing

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a manifest into an image
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("invalid file name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("duplicate file name {name}")]
    DuplicateName { name: String },

    #[error("first data sector {first} must be at least {min}")]
    DataSectorTooLow { first: u16, min: u16 },

    #[error("image of {total} sectors is outside {min}..={max}")]
    BadSectorTotal { total: u16, min: u16, max: u16 },

    #[error("catalog needs {needed} sectors but the image only has {total}")]
    ImageFull { needed: usize, total: u16 },

    #[error("bootloader is {size} bytes, the boot sector holds {max}")]
    BootloaderTooLarge { size: usize, max: usize },

    #[error("bootloader is missing the 0x55AA boot signature")]
    MissingBootSignature,
}

pub type Result<T> = core::result::Result<T, PackError>;

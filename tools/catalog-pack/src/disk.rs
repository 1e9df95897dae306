//! Bootable disk image assembly
//!
//! Layout on disk:
//! - Sector 0: bootloader (must end with the 0x55AA signature)
//! - Sectors 1..total_sectors: the catalog image (sector map and files)
//! - Sectors total_sectors..: kernel binary, padded to whole sectors
//!
//! The bootloader is told where the kernel starts by the caller; this
//! module only reports the sector numbers it used.

use crate::error::{PackError, Result};
use crate::layout::Layout;
use crate::SECTOR_SIZE;

/// Boot signature expected in the last two bytes of sector 0
pub const BOOT_SIGNATURE: [u8; 2] = [0x55, 0xAA];

/// Assembled disk image
#[derive(Debug, Clone)]
pub struct DiskImage {
    bytes: Vec<u8>,
    kernel_start_sector: u16,
    kernel_sectors: usize,
}

impl DiskImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn kernel_start_sector(&self) -> u16 {
        self.kernel_start_sector
    }

    pub fn kernel_sectors(&self) -> usize {
        self.kernel_sectors
    }

    pub fn total_sectors(&self) -> usize {
        self.bytes.len() / SECTOR_SIZE
    }
}

/// Combine bootloader, catalog image and kernel into one disk image
pub fn assemble(layout: &Layout, bootloader: &[u8], kernel: &[u8]) -> Result<DiskImage> {
    if bootloader.len() > SECTOR_SIZE {
        return Err(PackError::BootloaderTooLarge {
            size: bootloader.len(),
            max: SECTOR_SIZE,
        });
    }
    if bootloader.len() != SECTOR_SIZE || bootloader[SECTOR_SIZE - 2..] != BOOT_SIGNATURE {
        return Err(PackError::MissingBootSignature);
    }

    let mut bytes = layout.image();
    bytes[..SECTOR_SIZE].copy_from_slice(bootloader);

    let kernel_start_sector = layout.geometry().total_sectors;
    let kernel_sectors = kernel.len().div_ceil(SECTOR_SIZE);
    bytes.extend_from_slice(kernel);
    bytes.resize(bytes.len().next_multiple_of(SECTOR_SIZE), 0);

    log::info!(
        "disk image: {} sectors, kernel at sector {} ({} sector(s))",
        bytes.len() / SECTOR_SIZE,
        kernel_start_sector,
        kernel_sectors
    );

    Ok(DiskImage {
        bytes,
        kernel_start_sector,
        kernel_sectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Geometry;
    use crate::manifest::SourceFile;

    fn boot_sector() -> Vec<u8> {
        let mut sector = vec![0xEB; SECTOR_SIZE];
        sector[SECTOR_SIZE - 2..].copy_from_slice(&BOOT_SIGNATURE);
        sector
    }

    fn layout() -> Layout {
        Layout::plan(
            Geometry::default(),
            vec![SourceFile::new("README.MD", "This is a README file for the kernel.")],
        )
        .unwrap()
    }

    #[test]
    fn test_assemble_places_each_part() {
        let kernel = vec![0x90u8; 700];
        let disk = assemble(&layout(), &boot_sector(), &kernel).unwrap();
        let bytes = disk.bytes();

        assert_eq!(disk.kernel_start_sector(), 32);
        assert_eq!(disk.kernel_sectors(), 2);
        assert_eq!(disk.total_sectors(), 34);

        assert_eq!(&bytes[..SECTOR_SIZE], boot_sector().as_slice());
        assert!(bytes[2 * SECTOR_SIZE..].starts_with(b"This is a README file"));

        let kernel_offset = 32 * SECTOR_SIZE;
        assert_eq!(&bytes[kernel_offset..kernel_offset + 700], kernel.as_slice());
        assert!(bytes[kernel_offset + 700..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_unsigned_bootloader() {
        let err = assemble(&layout(), &[0u8; SECTOR_SIZE], &[]).unwrap_err();
        assert!(matches!(err, PackError::MissingBootSignature));

        let err = assemble(&layout(), &[0u8; 100], &[]).unwrap_err();
        assert!(matches!(err, PackError::MissingBootSignature));
    }

    #[test]
    fn test_rejects_oversized_bootloader() {
        let err = assemble(&layout(), &vec![0u8; SECTOR_SIZE + 1], &[]).unwrap_err();
        assert!(matches!(err, PackError::BootloaderTooLarge { size: 513, .. }));
    }
}

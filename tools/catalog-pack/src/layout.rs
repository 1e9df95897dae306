//! Sector assignment for catalog files
//!
//! Files are placed back to back from the first data sector in manifest
//! order. Each file gets `ceil((len + 1) / SECTOR_SIZE)` sectors so the
//! content is always followed by at least one NUL inside its own block.

use std::collections::HashSet;

use crate::error::{PackError, Result};
use crate::manifest::SourceFile;
use crate::{
    MAP_END_OF_CHAIN, MAP_FREE, MAP_RESERVED, MAP_SECTOR, MAX_SECTORS, NAME_LEN,
    RESERVED_SECTORS, SECTOR_SIZE,
};

/// Shape of the catalog image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub total_sectors: u16,
    pub first_data_sector: u16,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            total_sectors: 32,
            first_data_sector: RESERVED_SECTORS,
        }
    }
}

impl Geometry {
    pub fn image_len(&self) -> usize {
        self.total_sectors as usize * SECTOR_SIZE
    }

    /// The image must hold the boot sector, the map and everything up to
    /// the first data sector
    fn validate(&self) -> Result<()> {
        if self.first_data_sector < RESERVED_SECTORS {
            return Err(PackError::DataSectorTooLow {
                first: self.first_data_sector,
                min: RESERVED_SECTORS,
            });
        }
        let min = self.first_data_sector;
        if !(min..=MAX_SECTORS).contains(&self.total_sectors) {
            return Err(PackError::BadSectorTotal {
                total: self.total_sectors,
                min,
                max: MAX_SECTORS,
            });
        }
        Ok(())
    }
}

/// A file with its assigned sector range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedFile {
    /// Space-padded uppercase name as stored in the catalog record
    pub name: [u8; NAME_LEN],
    pub start_sector: u16,
    pub sector_count: u16,
    pub contents: Vec<u8>,
}

impl PlacedFile {
    /// Name without padding
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).trim_end().to_string()
    }

    pub fn sectors(&self) -> core::ops::Range<u16> {
        self.start_sector..self.start_sector + self.sector_count
    }
}

/// Number of sectors a file of `len` bytes occupies (NUL included)
pub fn sectors_for(len: usize) -> usize {
    (len + 1).div_ceil(SECTOR_SIZE)
}

/// Encode a catalog name: ASCII graphic, uppercased, space padded
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    let invalid = |reason| PackError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if name.len() > NAME_LEN {
        return Err(invalid("longer than 11 bytes"));
    }
    if !name.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(invalid("only printable ASCII without spaces is allowed"));
    }

    let mut encoded = [b' '; NAME_LEN];
    for (slot, byte) in encoded.iter_mut().zip(name.bytes()) {
        *slot = byte.to_ascii_uppercase();
    }
    Ok(encoded)
}

/// Planned catalog image
#[derive(Debug, Clone)]
pub struct Layout {
    geometry: Geometry,
    files: Vec<PlacedFile>,
}

impl Layout {
    /// Assign sectors to `sources` in order
    pub fn plan(geometry: Geometry, sources: Vec<SourceFile>) -> Result<Self> {
        geometry.validate()?;

        let mut seen = HashSet::new();
        let mut next_sector = geometry.first_data_sector as usize;
        let mut files = Vec::with_capacity(sources.len());

        for source in sources {
            let name = encode_name(&source.name)?;
            if !seen.insert(name) {
                return Err(PackError::DuplicateName { name: source.name });
            }

            let count = sectors_for(source.contents.len());
            let needed = next_sector + count;
            if needed > geometry.total_sectors as usize {
                return Err(PackError::ImageFull {
                    needed,
                    total: geometry.total_sectors,
                });
            }

            log::info!(
                "placing {:<11} at sector {} ({} sector(s), {} bytes)",
                source.name,
                next_sector,
                count,
                source.contents.len()
            );

            // Both fit in u16: bounded by total_sectors above
            files.push(PlacedFile {
                name,
                start_sector: next_sector as u16,
                sector_count: count as u16,
                contents: source.contents,
            });
            next_sector = needed;
        }

        Ok(Self { geometry, files })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn files(&self) -> &[PlacedFile] {
        &self.files
    }

    /// First sector not used by any file
    pub fn end_sector(&self) -> u16 {
        self.files
            .last()
            .map(|f| f.start_sector + f.sector_count)
            .unwrap_or(self.geometry.first_data_sector)
    }

    /// Sector map contents, one byte per image sector
    pub fn sector_map(&self) -> Vec<u8> {
        let mut map = vec![MAP_FREE; self.geometry.total_sectors as usize];
        for slot in map.iter_mut().take(RESERVED_SECTORS as usize) {
            *slot = MAP_RESERVED;
        }
        for file in &self.files {
            for sector in file.sectors() {
                let last = sector + 1 == file.start_sector + file.sector_count;
                map[sector as usize] = if last {
                    MAP_END_OF_CHAIN
                } else {
                    (sector + 1) as u8
                };
            }
        }
        map
    }

    /// Full catalog image: zeroed boot sector, sector map, file contents
    pub fn image(&self) -> Vec<u8> {
        let mut image = vec![0u8; self.geometry.image_len()];

        let map_offset = MAP_SECTOR as usize * SECTOR_SIZE;
        let map = self.sector_map();
        image[map_offset..map_offset + map.len()].copy_from_slice(&map);

        for file in &self.files {
            let offset = file.start_sector as usize * SECTOR_SIZE;
            image[offset..offset + file.contents.len()].copy_from_slice(&file.contents);
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_sources() -> Vec<SourceFile> {
        vec![
            SourceFile::new("README.MD", "This is a README file for the kernel."),
            SourceFile::new("MESSAGE.TXT", "This is a simple test message.\r\nHello, World!"),
        ]
    }

    #[test]
    fn test_default_catalog_uses_sectors_two_and_three() {
        let layout = Layout::plan(Geometry::default(), default_sources()).unwrap();
        let files = layout.files();

        assert_eq!(files[0].start_sector, 2);
        assert_eq!(files[0].sector_count, 1);
        assert_eq!(files[1].start_sector, 3);
        assert_eq!(files[1].sector_count, 1);
        assert_eq!(layout.end_sector(), 4);
    }

    #[test]
    fn test_sector_count_reserves_terminator() {
        assert_eq!(sectors_for(0), 1);
        assert_eq!(sectors_for(511), 1);
        // Exactly one sector of content still needs room for the NUL
        assert_eq!(sectors_for(512), 2);
        assert_eq!(sectors_for(1000), 2);
    }

    #[test]
    fn test_names_are_padded_and_uppercased() {
        assert_eq!(&encode_name("readme.md").unwrap(), b"README.MD  ");
        assert_eq!(&encode_name("MESSAGE.TXT").unwrap(), b"MESSAGE.TXT");
    }

    #[test]
    fn test_invalid_names() {
        assert!(encode_name("").is_err());
        assert!(encode_name("WAY_TOO_LONG.TXT").is_err());
        assert!(encode_name("TWO WORDS").is_err());
    }

    #[test]
    fn test_duplicate_names_differing_in_case() {
        let sources = vec![SourceFile::new("A.TXT", "1"), SourceFile::new("a.txt", "2")];
        let err = Layout::plan(Geometry::default(), sources).unwrap_err();
        assert!(matches!(err, PackError::DuplicateName { .. }));
    }

    #[test]
    fn test_image_full() {
        let geometry = Geometry {
            total_sectors: 4,
            first_data_sector: 2,
        };
        let sources = vec![SourceFile::new("BIG.BIN", vec![0xAA; 1024])];
        let err = Layout::plan(geometry, sources).unwrap_err();
        assert!(matches!(err, PackError::ImageFull { needed: 5, total: 4 }));
    }

    #[test]
    fn test_geometry_limits() {
        let too_big = Geometry {
            total_sectors: 300,
            first_data_sector: 2,
        };
        assert!(matches!(
            Layout::plan(too_big, vec![]).unwrap_err(),
            PackError::BadSectorTotal { .. }
        ));

        let overlaps_map = Geometry {
            total_sectors: 8,
            first_data_sector: 1,
        };
        assert!(matches!(
            Layout::plan(overlaps_map, vec![]).unwrap_err(),
            PackError::DataSectorTooLow { .. }
        ));
    }

    #[test]
    fn test_geometry_must_cover_reserved_sectors() {
        let no_map = Geometry {
            total_sectors: 1,
            first_data_sector: 2,
        };
        assert!(matches!(
            Layout::plan(no_map, vec![]).unwrap_err(),
            PackError::BadSectorTotal { total: 1, min: 2, .. }
        ));

        let data_past_end = Geometry {
            total_sectors: 8,
            first_data_sector: 10,
        };
        assert!(matches!(
            Layout::plan(data_past_end, vec![]).unwrap_err(),
            PackError::BadSectorTotal { total: 8, min: 10, .. }
        ));

        let map_only = Geometry {
            total_sectors: 2,
            first_data_sector: 2,
        };
        let layout = Layout::plan(map_only, vec![]).unwrap();
        assert_eq!(layout.image().len(), 2 * SECTOR_SIZE);
        assert_eq!(layout.end_sector(), 2);
    }

    #[test]
    fn test_sector_map_chains() {
        let sources = vec![
            SourceFile::new("ONE", "x"),
            SourceFile::new("TWO", vec![b'y'; 600]),
        ];
        let layout = Layout::plan(Geometry::default(), sources).unwrap();
        let map = layout.sector_map();

        assert_eq!(map.len(), 32);
        assert_eq!(&map[..2], &[MAP_RESERVED, MAP_RESERVED]);
        assert_eq!(map[2], MAP_END_OF_CHAIN);
        // TWO spans sectors 3 and 4
        assert_eq!(map[3], 4);
        assert_eq!(map[4], MAP_END_OF_CHAIN);
        assert!(map[5..].iter().all(|&b| b == MAP_FREE));
    }

    #[test]
    fn test_image_places_contents_at_sector_offsets() {
        let layout = Layout::plan(Geometry::default(), default_sources()).unwrap();
        let image = layout.image();

        assert_eq!(image.len(), 32 * SECTOR_SIZE);
        assert!(image[..SECTOR_SIZE].iter().all(|&b| b == 0));
        assert_eq!(image[SECTOR_SIZE + 2], MAP_END_OF_CHAIN);

        let readme = &image[2 * SECTOR_SIZE..3 * SECTOR_SIZE];
        assert!(readme.starts_with(b"This is a README file for the kernel."));

        let message = &image[3 * SECTOR_SIZE..4 * SECTOR_SIZE];
        let text = b"This is a simple test message.\r\nHello, World!";
        assert_eq!(&message[..text.len()], text);
        assert!(message[text.len()..].iter().all(|&b| b == 0));
    }
}

//! Sector map (sector 1 of the catalog image)
//!
//! One byte per image sector:
//! - `0x00`: free
//! - `0xFE`: reserved (boot sector, the map itself)
//! - `0xFF`: last sector of a file
//! - anything else: number of the next sector of the same file

use super::{CatalogError, SECTOR_SIZE};

/// Sector holding the map
pub const MAP_SECTOR: u16 = 1;

pub const MAP_FREE: u8 = 0x00;
pub const MAP_RESERVED: u8 = 0xFE;
pub const MAP_END_OF_CHAIN: u8 = 0xFF;

/// Decoded map byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorState {
    Free,
    Reserved,
    EndOfChain,
    Next(u16),
}

impl SectorState {
    pub const fn decode(byte: u8) -> Self {
        match byte {
            MAP_FREE => SectorState::Free,
            MAP_RESERVED => SectorState::Reserved,
            MAP_END_OF_CHAIN => SectorState::EndOfChain,
            next => SectorState::Next(next as u16),
        }
    }
}

/// Read-only view of the sector map
#[derive(Debug, Clone, Copy)]
pub struct SectorMap<'a> {
    bytes: &'a [u8],
}

impl<'a> SectorMap<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The map stored in `image`, one byte per sector of the image
    ///
    /// `None` if the image is too short to contain the map sector.
    pub fn from_image(image: &'a [u8]) -> Option<Self> {
        let start = MAP_SECTOR as usize * SECTOR_SIZE;
        let sectors = (image.len() / SECTOR_SIZE).min(SECTOR_SIZE);
        if image.len() < start + SECTOR_SIZE {
            return None;
        }
        Some(Self::new(&image[start..start + sectors]))
    }

    /// Number of sectors described
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn state(&self, sector: u16) -> Option<SectorState> {
        self.bytes.get(sector as usize).map(|&b| SectorState::decode(b))
    }

    /// Walk the chain starting at `start`
    pub fn chain(&self, start: u16) -> Chain<'a> {
        Chain {
            map: *self,
            next: Some(start),
            steps: 0,
        }
    }

    /// Check that the chain from `start` is exactly `start..start + count`
    pub fn verify_contiguous(&self, start: u16, count: u16) -> Result<(), CatalogError> {
        let mut walked = 0u16;
        for (expected, sector) in (start..).zip(self.chain(start)) {
            let sector = sector?;
            if sector != expected {
                return Err(CatalogError::BrokenChain { sector });
            }
            walked += 1;
        }
        if walked != count {
            return Err(CatalogError::BrokenChain {
                sector: start.saturating_add(walked.min(count)),
            });
        }
        Ok(())
    }
}

/// Iterator over the sectors of one chain
///
/// Yields an error and stops on a free/reserved sector, an out-of-range
/// link, or a loop.
pub struct Chain<'a> {
    map: SectorMap<'a>,
    next: Option<u16>,
    steps: usize,
}

impl Iterator for Chain<'_> {
    type Item = Result<u16, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        let sector = self.next.take()?;
        self.steps += 1;
        if self.steps > self.map.len() {
            return Some(Err(CatalogError::BrokenChain { sector }));
        }

        match self.map.state(sector) {
            Some(SectorState::EndOfChain) => Some(Ok(sector)),
            Some(SectorState::Next(next)) => {
                self.next = Some(next);
                Some(Ok(sector))
            }
            _ => Some(Err(CatalogError::BrokenChain { sector })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    //           0     1     2     3  4     5     6
    const MAP: [u8; 7] = [0xFE, 0xFE, 0xFF, 4, 5, 0xFF, 0x00];

    #[test]
    fn test_decode() {
        let map = SectorMap::new(&MAP);
        assert_eq!(map.state(0), Some(SectorState::Reserved));
        assert_eq!(map.state(2), Some(SectorState::EndOfChain));
        assert_eq!(map.state(3), Some(SectorState::Next(4)));
        assert_eq!(map.state(6), Some(SectorState::Free));
        assert_eq!(map.state(7), None);
    }

    #[test]
    fn test_chain_walk() {
        let map = SectorMap::new(&MAP);
        let sectors: Vec<_> = map.chain(3).collect::<Result<_, _>>().unwrap();
        assert_eq!(sectors, [3, 4, 5]);
        assert!(map.verify_contiguous(3, 3).is_ok());
        assert!(map.verify_contiguous(2, 1).is_ok());
    }

    #[test]
    fn test_wrong_length_is_broken() {
        let map = SectorMap::new(&MAP);
        assert!(map.verify_contiguous(3, 2).is_err());
        assert!(map.verify_contiguous(2, 2).is_err());
    }

    #[test]
    fn test_chain_into_free_sector() {
        let map = SectorMap::new(&MAP);
        assert_eq!(
            map.verify_contiguous(6, 1),
            Err(CatalogError::BrokenChain { sector: 6 })
        );
    }

    #[test]
    fn test_loop_terminates() {
        let looping = [0xFE, 0xFE, 3, 2];
        let map = SectorMap::new(&looping);
        let results: Vec<_> = map.chain(2).collect();
        assert_eq!(results.len(), 5);
        assert!(results.last().unwrap().is_err());
    }

    #[test]
    fn test_from_image_needs_map_sector() {
        assert!(SectorMap::from_image(&[0u8; 512]).is_none());

        let mut image = [0u8; 4 * 512];
        image[512] = MAP_RESERVED;
        image[512 + 3] = MAP_END_OF_CHAIN;
        let map = SectorMap::from_image(&image).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.state(3), Some(SectorState::EndOfChain));
    }
}

//! Catalog lookup and content access

use super::entry::{CatalogEntry, ContentBlock};
use super::name::FileName;
use super::sector_map::SectorMap;
use super::{generated, CatalogError, SECTOR_SIZE};

/// Read-only file catalog over a sector-addressed image
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    entries: &'a [CatalogEntry],
    image: &'a [u8],
}

impl Catalog<'static> {
    /// The catalog compiled into this kernel
    ///
    /// The table and image come from `build.rs`, which already enforced the
    /// invariants `new` checks (unique names, no overlap, within image).
    pub fn builtin() -> Self {
        Self {
            entries: &generated::GENERATED_ENTRIES,
            image: generated::IMAGE,
        }
    }
}

impl<'a> Catalog<'a> {
    /// Build a catalog, checking that names are unique, sector ranges do
    /// not overlap and every block lies inside `image`
    pub fn new(entries: &'a [CatalogEntry], image: &'a [u8]) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.block().range().end > image.len() {
                return Err(CatalogError::OutOfImage { name: *entry.name() });
            }

            for other in &entries[..i] {
                if other.name() == entry.name() {
                    return Err(CatalogError::DuplicateName(*entry.name()));
                }
                let (a, b) = (entry.sectors(), other.sectors());
                if a.start < b.end && b.start < a.end {
                    return Err(CatalogError::Overlap {
                        name: *entry.name(),
                        other: *other.name(),
                    });
                }
            }
        }

        Ok(Self { entries, image })
    }

    pub fn entries(&self) -> &'a [CatalogEntry] {
        self.entries
    }

    /// The whole backing image
    pub fn image(&self) -> &'a [u8] {
        self.image
    }

    /// Size of the backing image in sectors
    pub fn image_sectors(&self) -> usize {
        self.image.len() / SECTOR_SIZE
    }

    /// First entry whose padded name matches
    pub fn find(&self, name: &FileName) -> Option<&'a CatalogEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Resolve `name` to its content block
    ///
    /// Anything that is not a valid catalog name cannot match, so it is
    /// reported as `NameNotFound` as well.
    pub fn lookup(&self, name: &str) -> Result<ContentBlock, CatalogError> {
        let name = FileName::new(name).map_err(|_| CatalogError::NameNotFound)?;
        self.find(&name)
            .map(CatalogEntry::block)
            .ok_or(CatalogError::NameNotFound)
    }

    /// Exact bytes of `block`
    ///
    /// # Panics
    /// If `block` lies outside the image; blocks obtained from this catalog
    /// never do.
    pub fn read(&self, block: ContentBlock) -> &'a [u8] {
        &self.image[block.range()]
    }

    /// Bytes of `block` up to the first NUL
    pub fn text(&self, block: ContentBlock) -> &'a [u8] {
        let bytes = self.read(block);
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        &bytes[..end]
    }

    pub fn sector_map(&self) -> Option<SectorMap<'a>> {
        SectorMap::from_image(self.image)
    }

    /// Check every entry against the sector map
    pub fn verify_chains(&self) -> Result<(), CatalogError> {
        let map = self
            .sector_map()
            .ok_or(CatalogError::BrokenChain { sector: 1 })?;
        for entry in self.entries {
            map.verify_contiguous(entry.start_sector(), entry.sector_count())?;
        }
        Ok(())
    }
}

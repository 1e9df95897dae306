//! Catalog manifest (`catalog.toml`)
//!
//! ```toml
//! total_sectors = 32
//! first_data_sector = 2
//!
//! [[file]]
//! name = "README.MD"
//! source = "files/README.MD"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackError, Result};
use crate::layout::Geometry;

fn default_total_sectors() -> u16 {
    32
}

fn default_first_data_sector() -> u16 {
    crate::RESERVED_SECTORS
}

/// Parsed manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Size of the catalog image in sectors
    #[serde(default = "default_total_sectors")]
    pub total_sectors: u16,

    /// First sector handed out to file contents
    #[serde(default = "default_first_data_sector")]
    pub first_data_sector: u16,

    /// Files in catalog order
    #[serde(default, rename = "file")]
    pub files: Vec<FileSpec>,
}

/// One `[[file]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    /// Catalog name, at most 11 bytes
    pub name: String,

    /// Content path, relative to the manifest
    pub source: PathBuf,
}

/// A manifest file with its contents loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

impl Manifest {
    /// Parse manifest text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a manifest file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            total_sectors: self.total_sectors,
            first_data_sector: self.first_data_sector,
        }
    }

    /// Content paths resolved against `base_dir`
    pub fn source_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|f| base_dir.join(&f.source)).collect()
    }

    /// Load every listed file from disk
    pub fn read_sources(&self, base_dir: &Path) -> Result<Vec<SourceFile>> {
        self.files
            .iter()
            .map(|spec| {
                let path = base_dir.join(&spec.source);
                let contents = fs::read(&path).map_err(|source| PackError::Io {
                    path: path.clone(),
                    source,
                })?;
                log::debug!("loaded {} ({} bytes) from {}", spec.name, contents.len(), path.display());
                Ok(SourceFile::new(spec.name.clone(), contents))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::parse(
            r#"
            total_sectors = 16
            first_data_sector = 3

            [[file]]
            name = "README.MD"
            source = "files/README.MD"

            [[file]]
            name = "MESSAGE.TXT"
            source = "files/MESSAGE.TXT"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.total_sectors, 16);
        assert_eq!(manifest.first_data_sector, 3);
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[1].name, "MESSAGE.TXT");
        assert_eq!(manifest.files[1].source, PathBuf::from("files/MESSAGE.TXT"));
    }

    #[test]
    fn test_parse_defaults() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.total_sectors, 32);
        assert_eq!(manifest.first_data_sector, 2);
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = Manifest::parse("sector_size = 1024").unwrap_err();
        assert!(matches!(err, PackError::Manifest(_)));
    }

    #[test]
    fn test_source_paths_are_relative_to_base() {
        let manifest = Manifest::parse(
            r#"
            [[file]]
            name = "A"
            source = "a.txt"
            "#,
        )
        .unwrap();
        let paths = manifest.source_paths(Path::new("/tmp/catalog"));
        assert_eq!(paths, vec![PathBuf::from("/tmp/catalog/a.txt")]);
    }

    #[test]
    fn test_missing_source_reports_path() {
        let manifest = Manifest::parse(
            r#"
            [[file]]
            name = "GONE"
            source = "does-not-exist.bin"
            "#,
        )
        .unwrap();
        let err = manifest
            .read_sources(Path::new("/nonexistent-picokern-dir"))
            .unwrap_err();
        match err {
            PackError::Io { path, .. } => assert!(path.ends_with("does-not-exist.bin")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

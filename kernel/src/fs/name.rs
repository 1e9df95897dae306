//! Fixed-width catalog file names

use core::fmt;

use super::CatalogError;

/// Width of the name field
pub const NAME_LEN: usize = 11;

/// An 11-byte, space-padded, ASCII uppercase file name
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FileName([u8; NAME_LEN]);

impl FileName {
    /// Normalize and pad `name`
    ///
    /// Names are ASCII graphic characters only (no spaces), at most
    /// `NAME_LEN` bytes, and compared case-insensitively.
    pub fn new(name: &str) -> Result<Self, CatalogError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > NAME_LEN || !bytes.iter().all(u8::is_ascii_graphic) {
            return Err(CatalogError::InvalidName);
        }

        let mut padded = [b' '; NAME_LEN];
        for (slot, byte) in padded.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(padded))
    }

    /// Wrap an already padded record field
    pub const fn from_raw(raw: [u8; NAME_LEN]) -> Self {
        Self(raw)
    }

    pub const fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }

    /// The name without its padding
    pub fn trimmed(&self) -> &[u8] {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |i| i + 1);
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.trimmed()).unwrap_or("?")
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileName({:?})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_padding_and_case() {
        let name = FileName::new("readme.md").unwrap();
        assert_eq!(name.as_bytes(), b"README.MD  ");
        assert_eq!(name.trimmed(), b"README.MD");
        assert_eq!(name.to_string(), "README.MD");
    }

    #[test]
    fn test_full_width_name() {
        let name = FileName::new("MESSAGE.TXT").unwrap();
        assert_eq!(name.as_bytes(), b"MESSAGE.TXT");
        assert_eq!(name.as_str(), "MESSAGE.TXT");
    }

    #[test]
    fn test_rejects_invalid_names() {
        assert_eq!(FileName::new(""), Err(CatalogError::InvalidName));
        assert_eq!(FileName::new("TWELVE_CHARS"), Err(CatalogError::InvalidName));
        assert_eq!(FileName::new("A B"), Err(CatalogError::InvalidName));
        assert_eq!(FileName::new("TAB\t"), Err(CatalogError::InvalidName));
    }

    #[test]
    fn test_nul_padding_trims_too() {
        let name = FileName::from_raw(*b"A.TXT\0\0\0\0\0\0");
        assert_eq!(name.trimmed(), b"A.TXT");
    }
}

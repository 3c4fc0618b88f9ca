//! Input file facts for the manifest

use crate::errors::{io_error_at, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size and content digest of an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFacts {
    pub size: u64,
    /// Lowercase hex SHA-256
    pub sha256: String,
}

/// Stream `path` through SHA-256.
///
/// # Errors
///
/// `Io` when the file cannot be opened or read.
pub fn file_facts(path: &Path) -> Result<FileFacts> {
    let mut file = File::open(path).map_err(|e| io_error_at("open_input", path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| io_error_at("read_input", path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as u64;
    }

    Ok(FileFacts {
        size,
        sha256: hex::encode(hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_facts_known_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.hhh");
        std::fs::write(&path, b"abc").unwrap();

        let facts = file_facts(&path).unwrap();
        assert_eq!(facts.size, 3);
        assert_eq!(
            facts.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = file_facts(&dir.path().join("absent.hhh")).unwrap_err();
        assert_eq!(err.kind(), bundlesnap_core::ExErrorKind::Io);
    }
}

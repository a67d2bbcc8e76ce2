//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Open a file for buffered line reading.
    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;

    /// Write string content to file, truncating previous content.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_real_fs_write_truncates_and_reads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.tex");
        let fs = RealFileSystem;

        fs.write(&path, "a much longer first version\n").unwrap();
        fs.write(&path, "short\n").unwrap();

        let mut content = String::new();
        fs.open_buffered(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "short\n");
    }

    #[test]
    fn test_real_fs_open_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = RealFileSystem
            .open_buffered(&temp.path().join("missing.txt"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

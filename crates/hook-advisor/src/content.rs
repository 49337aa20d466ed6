//! Reading the current contents of edited files.

use std::io;
use std::path::Path;

/// Source of on-disk file contents for Edit/MultiEdit events.
pub trait ContentProvider {
    /// Full contents of `path` as UTF-8 text.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads straight from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentProvider;

impl ContentProvider for FsContentProvider {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_utf8_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "fn main() {{}}\n").unwrap();

        let content = FsContentProvider.read(file.path()).unwrap();
        assert_eq!(content, "fn main() {}\n");
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = FsContentProvider.read(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_missing_file() {
        let err = FsContentProvider
            .read(Path::new("/definitely/not/here.py"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

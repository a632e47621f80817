//! File removal.

use std::path::Path;

use agesweep_core::FileError;

/// Remove a single expired file.
///
/// Directories are never removed, even when a pattern matches them; the
/// attempt fails like any other undeletable entry.
pub fn purge_file(path: &Path) -> Result<(), FileError> {
    std::fs::remove_file(path).map_err(|e| FileError::delete(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_purge_removes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mca-00000000001.mpg");
        std::fs::write(&path, b"x").unwrap();

        purge_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_purge_vanished_file() {
        let temp = TempDir::new().unwrap();
        let err = purge_file(&temp.path().join("gone.mpg")).unwrap_err();
        assert!(matches!(err, FileError::Delete { .. }));
        assert!(err.is_vanished());
    }

    #[test]
    fn test_purge_refuses_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("mca-00000000002.d");
        std::fs::create_dir(&dir).unwrap();

        assert!(purge_file(&dir).is_err());
        assert!(dir.is_dir());
    }
}

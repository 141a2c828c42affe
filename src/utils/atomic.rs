//! Atomic file operations
//!
//! Writes go to a `.tmp` sibling, are synced, then renamed over the
//! destination, so the data file is either the old or the new version.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type for atomic operations
pub type AtomicResult<T> = Result<T, AtomicError>;

/// Errors that can occur during atomic operations
#[derive(Debug, Error)]
pub enum AtomicError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot replace {path}: {source}")]
    Replace {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Atomically write a file using a writer function
///
/// Avoids building the whole document in memory when serializing directly
/// into the file.
///
/// ```ignore
/// atomic_write_with("data/qa_data.json", |file| file.write_all(b"{}"))?;
/// ```
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> AtomicResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    write_fn(&mut file)?;
    file.sync_all()?;

    fs::rename(&temp_path, path).map_err(|source| AtomicError::Replace {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

/// Remove a `.tmp` sibling left behind by an interrupted write.
///
/// Returns `true` when a leftover file was removed.
pub fn cleanup_temp_file<P: AsRef<Path>>(path: P) -> AtomicResult<bool> {
    let temp_path = path.as_ref().with_extension("tmp");
    if !temp_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp_path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_str(path: &Path, content: &str) -> AtomicResult<()> {
        atomic_write_with(path, |file| file.write_all(content.as_bytes()))
    }

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qa_data.json");

        write_str(&path, "{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qa_data.json");

        write_str(&path, "old").unwrap();
        write_str(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("qa_data.json");

        write_str(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_failed_write_keeps_old_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qa_data.json");
        write_str(&path, "old").unwrap();

        let result = atomic_write_with(&path, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "serializer failed"))
        });

        assert!(matches!(result, Err(AtomicError::Io(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_replace_failure_names_destination() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = temp_dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_str(&path, "data").unwrap_err();
        assert!(matches!(err, AtomicError::Replace { .. }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_cleanup_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qa_data.json");
        fs::write(path.with_extension("tmp"), "partial").unwrap();

        assert!(cleanup_temp_file(&path).unwrap());
        assert!(!path.with_extension("tmp").exists());
        assert!(!cleanup_temp_file(&path).unwrap());
    }

    #[test]
    fn test_cleanup_failure_keeps_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qa_data.json");
        // A directory where the temp file would be cannot be removed as a file
        fs::create_dir(path.with_extension("tmp")).unwrap();

        let err = cleanup_temp_file(&path).unwrap_err();
        assert!(matches!(err, AtomicError::Io(_)));
    }
}

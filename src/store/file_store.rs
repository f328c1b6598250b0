//! store::file_store
//!
//! File-based offset storage.
//!
//! # Storage
//!
//! - Offsets are stored in `~/.spine/offsets.toml` as a flat table of
//!   `"<absolute path>" = <offset>` entries
//! - A missing file reads as an empty store
//! - All writes are atomic (write to temp file, then rename)
//! - An exclusive lock on a sibling `.lock` file is held across the
//!   read-modify-write, so concurrent shells cannot drop each other's
//!   entries
//!
//! # Example
//!
//! ```ignore
//! use spine::store::{FileOffsetStore, OffsetStore};
//! use spine::core::types::PageOffset;
//!
//! let store = FileOffsetStore::new()?;
//! store.save("/home/me/report.json", PageOffset::new(2))?;
//!
//! if let Some(offset) = store.load("/home/me/report.json")? {
//!     // Apply offset...
//! }
//! ```

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use super::traits::{OffsetStore, StoreError};
use crate::core::types::PageOffset;

/// File-based offset storage.
///
/// Stores per-document offsets in a TOML file at `~/.spine/offsets.toml`.
/// This is the default store used by the shell.
#[derive(Debug)]
pub struct FileOffsetStore {
    /// Path to the offsets file
    path: PathBuf,
}

impl FileOffsetStore {
    /// Create a new file offset store at the default location.
    ///
    /// The default location is `~/.spine/offsets.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::ReadError("cannot determine home directory".into()))?;
        let path = home.join(".spine").join("offsets.toml");
        Ok(Self { path })
    }

    /// Create a file offset store at a custom path.
    ///
    /// This is primarily useful for testing.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the offsets file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read all offsets from the file.
    fn read_offsets(&self) -> Result<HashMap<String, i64>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::ReadError(format!("cannot read offsets file: {}", e)))?;

        let offsets: HashMap<String, i64> = toml::from_str(&content)
            .map_err(|e| StoreError::ReadError(format!("cannot parse offsets file: {}", e)))?;

        Ok(offsets)
    }

    /// Write offsets to the file atomically.
    fn write_offsets(&self, offsets: &HashMap<String, i64>) -> Result<(), StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(offsets)
            .map_err(|e| StoreError::WriteError(format!("cannot serialize offsets: {}", e)))?;

        // Write to a temp file first for atomicity
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::WriteError(format!("cannot create temp file: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| StoreError::WriteError(format!("cannot write offsets: {}", e)))?;

            file.sync_all()
                .map_err(|e| StoreError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::WriteError(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    /// Acquire the exclusive store lock for a read-modify-write.
    fn acquire_lock(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteError(format!("cannot create directory: {}", e)))?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.path.with_extension("lock"))
            .map_err(|e| StoreError::WriteError(format!("cannot create lock file: {}", e)))?;
        lock.lock_exclusive()
            .map_err(|e| StoreError::WriteError(format!("cannot acquire store lock: {}", e)))?;
        Ok(lock)
    }
}

impl OffsetStore for FileOffsetStore {
    fn load(&self, key: &str) -> Result<Option<PageOffset>, StoreError> {
        let offsets = self.read_offsets()?;
        Ok(offsets.get(key).copied().map(PageOffset::new))
    }

    fn save(&self, key: &str, offset: PageOffset) -> Result<(), StoreError> {
        let lock = self.acquire_lock()?;
        let result = (|| {
            let mut offsets = self.read_offsets()?;
            offsets.insert(key.to_string(), offset.get());
            self.write_offsets(&offsets)
        })();
        let _ = FileExt::unlock(&lock);
        result
    }

    fn forget(&self, key: &str) -> Result<(), StoreError> {
        let lock = self.acquire_lock()?;
        let result = (|| {
            let mut offsets = self.read_offsets()?;
            offsets.remove(key);
            self.write_offsets(&offsets)
        })();
        let _ = FileExt::unlock(&lock);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileOffsetStore) {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("offsets.toml");
        let store = FileOffsetStore::with_path(path);
        (temp, store)
    }

    #[test]
    fn load_nonexistent_returns_none() {
        let (_temp, store) = create_test_store();

        let result = store.load("/nowhere/doc.json").expect("load");
        assert!(result.is_none());
    }

    #[test]
    fn save_and_load() {
        let (_temp, store) = create_test_store();

        store
            .save("/docs/report.json", PageOffset::new(2))
            .expect("save");

        let result = store.load("/docs/report.json").expect("load");
        assert_eq!(result, Some(PageOffset::new(2)));
    }

    #[test]
    fn save_overwrites() {
        let (_temp, store) = create_test_store();

        store.save("/d.json", PageOffset::new(1)).expect("first");
        store.save("/d.json", PageOffset::new(-4)).expect("second");

        assert_eq!(store.load("/d.json").expect("load"), Some(PageOffset::new(-4)));
    }

    #[test]
    fn forget_existing() {
        let (_temp, store) = create_test_store();

        store.save("/d.json", PageOffset::new(3)).expect("save");
        store.forget("/d.json").expect("forget");

        assert!(store.load("/d.json").expect("load").is_none());
    }

    #[test]
    fn forget_nonexistent_ok() {
        let (_temp, store) = create_test_store();

        store.forget("/missing.json").expect("forget nonexistent");
    }

    #[test]
    fn multiple_documents() {
        let (_temp, store) = create_test_store();

        store.save("/a.json", PageOffset::new(1)).expect("a");
        store.save("/b.json", PageOffset::new(-2)).expect("b");
        store.save("/c.json", PageOffset::zero()).expect("c");

        assert_eq!(store.load("/a.json").unwrap(), Some(PageOffset::new(1)));
        assert_eq!(store.load("/b.json").unwrap(), Some(PageOffset::new(-2)));
        assert_eq!(store.load("/c.json").unwrap(), Some(PageOffset::zero()));
    }

    #[test]
    fn creates_directory_if_missing() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("subdir").join("offsets.toml");
        let store = FileOffsetStore::with_path(path.clone());

        assert!(!path.parent().unwrap().exists());

        store.save("/d.json", PageOffset::new(5)).expect("save");

        assert!(path.exists());
    }

    #[test]
    fn persistence_across_instances() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("offsets.toml");

        {
            let store = FileOffsetStore::with_path(path.clone());
            store.save("/d.json", PageOffset::new(7)).expect("save");
        }

        {
            let store = FileOffsetStore::with_path(path);
            assert_eq!(store.load("/d.json").expect("load"), Some(PageOffset::new(7)));
        }
    }

    #[test]
    fn garbled_file_reports_read_error() {
        let (_temp, store) = create_test_store();

        fs::create_dir_all(store.path().parent().unwrap()).expect("mkdir");
        fs::write(store.path(), "not = [valid").expect("write bad toml");

        let err = store.load("/d.json").unwrap_err();
        assert!(err.to_string().contains("cannot parse"));
    }

    #[test]
    fn keys_with_spaces_and_unicode() {
        let (_temp, store) = create_test_store();

        let key = "/home/mü/my docs/weird ü.json";
        store.save(key, PageOffset::new(9)).expect("save");
        assert_eq!(store.load(key).expect("load"), Some(PageOffset::new(9)));
    }
}

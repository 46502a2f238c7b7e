//! File-backed key-value storage
//!
//! Each key lives in its own file under the data directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash never
//! leaves a half-written value behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::error::StorageResult;
use super::{validate_key, KeyValueStore};

/// Durable storage rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = ?dir, "Opened file store");
        Ok(Self { dir })
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{}.tmp", key));

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        tracing::trace!(key = %key, bytes = value.len(), "Stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get_item("auth_token").unwrap(), None);

        store.set_item("auth_token", "token-1").unwrap();
        assert_eq!(store.get_item("auth_token").unwrap().as_deref(), Some("token-1"));

        store.set_item("auth_token", "token-2").unwrap();
        assert_eq!(store.get_item("auth_token").unwrap().as_deref(), Some("token-2"));

        store.remove_item("auth_token").unwrap();
        assert_eq!(store.get_item("auth_token").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.remove_item("never-set").is_ok());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set_item("auth-storage", r#"{"state":{}}"#).unwrap();
        }

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get_item("auth-storage").unwrap().as_deref(),
            Some(r#"{"state":{}}"#)
        );
        assert!(!dir.path().join("auth-storage.tmp").exists());
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().exists());
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let err = store.set_item("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}

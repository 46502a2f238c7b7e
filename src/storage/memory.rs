//! In-memory key-value storage
//!
//! Nothing survives the process. Clones share the same map, which lets a
//! test hand one handle to the client and inspect another.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::{StorageError, StorageResult};
use super::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set_item("auth_token", "abc").unwrap();
        assert_eq!(other.get_item("auth_token").unwrap().as_deref(), Some("abc"));
        assert_eq!(other.len(), 1);

        other.remove_item("auth_token").unwrap();
        assert!(store.is_empty());
    }
}

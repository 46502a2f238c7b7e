//! Durable Client Storage
//!
//! A small key-value store standing in for browser local storage. The
//! session keeps two keys here: the bearer token and the serialized auth
//! record.
//!
//! - **file**: One file per key inside the data directory
//! - **memory**: In-process map, for tests and ephemeral sessions
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use iprescribe::storage::{FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./iprescribe_data")?;
//!     store.set_item("auth_token", "abc123")?;
//!     assert_eq!(store.get_item("auth_token")?.as_deref(), Some("abc123"));
//!     store.remove_item("auth_token")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which the bearer token is kept
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key under which the auth store persists its state
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// String key-value storage shared by the API client and persisted stores
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never set or was removed
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Keys become file names, so only a conservative alphabet is accepted
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(AUTH_TOKEN_KEY).is_ok());
        assert!(validate_key(AUTH_STORAGE_KEY).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("a/b").is_err());
    }
}

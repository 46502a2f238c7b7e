//! Persisted auth store

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use super::PersistedStore;
use crate::models::AuthUser;
use crate::storage::{KeyValueStore, StorageResult, AUTH_STORAGE_KEY};

/// Signed-in user and flag, as persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Auth store backed by the `auth-storage` record
#[derive(Clone)]
pub struct AuthStore {
    inner: PersistedStore<AuthState>,
}

impl AuthStore {
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::open(storage, AUTH_STORAGE_KEY, AuthState::default()),
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner.get()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.get().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.get().is_authenticated
    }

    /// Sign in an administrator known only by email
    pub fn login(&self, email: &str) -> StorageResult<()> {
        self.login_as(AuthUser::admin(email))
    }

    pub fn login_as(&self, user: AuthUser) -> StorageResult<()> {
        self.inner.update(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
        })
    }

    pub fn logout(&self) -> StorageResult<()> {
        self.inner.update(|state| {
            state.user = None;
            state.is_authenticated = false;
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn test_login_sets_default_admin() {
        let store = AuthStore::open(Arc::new(MemoryStore::new()));
        store.login("admin@careoneclinics.com").unwrap();

        let user = store.user().unwrap();
        assert_eq!(user.email, "admin@careoneclinics.com");
        assert_eq!(user.name, "Admin User");
        assert_eq!(user.role, Role::Admin);
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_persisted_record_shape() {
        let storage = MemoryStore::new();
        let store = AuthStore::open(Arc::new(storage.clone()));
        store.login("ops@careoneclinics.com").unwrap();

        let raw = storage.get_item(AUTH_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["state"]["isAuthenticated"], true);
        assert_eq!(json["state"]["user"]["role"], "admin");
        assert_eq!(json["version"], 0);
    }

    #[test]
    fn test_logout_survives_reload() {
        let dir = tempdir().unwrap();

        let store = AuthStore::open(Arc::new(FileStore::open(dir.path()).unwrap()));
        store.login("admin@careoneclinics.com").unwrap();

        let reloaded = AuthStore::open(Arc::new(FileStore::open(dir.path()).unwrap()));
        assert!(reloaded.is_authenticated());
        reloaded.logout().unwrap();

        let after_logout = AuthStore::open(Arc::new(FileStore::open(dir.path()).unwrap()));
        assert!(!after_logout.is_authenticated());
        assert!(after_logout.user().is_none());
    }
}

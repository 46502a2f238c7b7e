//! Client State Stores
//!
//! Observable containers for state that lives outside the server data:
//!
//! - **auth**: Signed-in user, persisted under `auth-storage`
//! - **theme**: Light/dark mode
//! - **dashboard**: Patient table limit and date-range label
//! - **ui**: Sidebar visibility
//!
//! Every store is a cheap handle over a `tokio::sync::watch` channel;
//! clones share state and subscribers see every mutation.

pub mod auth;
pub mod dashboard;
pub mod theme;
pub mod ui;

pub use auth::{AuthState, AuthStore};
pub use dashboard::{DashboardFilters, DashboardStore, DEFAULT_DATE_RANGE, DEFAULT_LIMIT, SEE_ALL_LIMIT};
pub use theme::{ThemeMode, ThemeState, ThemeStore};
pub use ui::{UiState, UiStore};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Observable in-memory state container
pub struct Store<S> {
    tx: Arc<watch::Sender<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<S: Clone + Send + Sync + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current state
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Mutate in place and notify subscribers
    pub fn update<F: FnOnce(&mut S)>(&self, f: F) {
        self.tx.send_modify(f);
    }

    /// Replace the whole state and notify subscribers
    pub fn set(&self, state: S) {
        self.tx.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

/// On-disk shape of a persisted store
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    state: S,
    version: u32,
}

const ENVELOPE_VERSION: u32 = 0;

/// Store that writes its state to durable storage on every mutation
pub struct PersistedStore<S> {
    inner: Store<S>,
    storage: Arc<dyn KeyValueStore>,
    key: &'static str,
    /// Serializes write-then-publish across clones
    writer: Arc<Mutex<()>>,
}

impl<S> Clone for PersistedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            storage: Arc::clone(&self.storage),
            key: self.key,
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<S> PersistedStore<S>
where
    S: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Rehydrate from `key`, falling back to `initial` when the record is
    /// missing or unreadable
    pub fn open(storage: Arc<dyn KeyValueStore>, key: &'static str, initial: S) -> Self {
        let state = match storage.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Envelope<S>>(&raw) {
                Ok(envelope) => envelope.state,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable persisted state");
                    initial
                }
            },
            Ok(None) => initial,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read persisted state");
                initial
            }
        };

        Self {
            inner: Store::new(state),
            storage,
            key,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> S {
        self.inner.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.inner.subscribe()
    }

    /// Apply `f` to a copy, write it through to storage, then publish it
    ///
    /// A failed write leaves both the in-memory state and subscribers
    /// untouched.
    pub fn update<F: FnOnce(&mut S)>(&self, f: F) -> StorageResult<()> {
        let _writer = self
            .writer
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let mut next = self.inner.get();
        f(&mut next);
        self.persist(&next)?;
        self.inner.set(next);
        Ok(())
    }

    fn persist(&self, state: &S) -> StorageResult<()> {
        let envelope = Envelope {
            state,
            version: ENVELOPE_VERSION,
        };
        let raw = serde_json::to_string(&envelope)?;
        self.storage.set_item(self.key, &raw)
    }
}

/// All client stores, built together at startup
#[derive(Clone)]
pub struct Stores {
    pub auth: AuthStore,
    pub theme: ThemeStore,
    pub dashboard: DashboardStore,
    pub ui: UiStore,
}

impl Stores {
    /// Build every store; only the auth store reads `storage`
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            auth: AuthStore::open(storage),
            theme: ThemeStore::new(),
            dashboard: DashboardStore::new(),
            ui: UiStore::new(),
        }
    }
}

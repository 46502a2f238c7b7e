//! Theme store

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
}

/// In-memory theme preference
#[derive(Clone)]
pub struct ThemeStore {
    inner: Store<ThemeState>,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(ThemeState::default()),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.get().mode
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.inner.update(|state| state.mode = mode);
    }

    pub fn toggle_mode(&self) {
        self.inner.update(|state| state.mode = state.mode.toggled());
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_mode() {
        let store = ThemeStore::new();
        assert_eq!(store.mode(), ThemeMode::Light);

        store.toggle_mode();
        assert_eq!(store.mode(), ThemeMode::Dark);
        store.toggle_mode();
        assert_eq!(store.mode(), ThemeMode::Light);

        store.set_mode(ThemeMode::Dark);
        store.toggle_mode();
        store.toggle_mode();
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_subscriber_notified_on_toggle() {
        let store = ThemeStore::new();
        let rx = store.subscribe();
        store.toggle_mode();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().mode, ThemeMode::Dark);
    }
}

//! UI store

use tokio::sync::watch;

use super::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_open: bool,
}

#[derive(Clone)]
pub struct UiStore {
    inner: Store<UiState>,
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(UiState::default()),
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.inner.get().sidebar_open
    }

    pub fn toggle_sidebar(&self) {
        self.inner.update(|s| s.sidebar_open = !s.sidebar_open);
    }

    pub fn close_sidebar(&self) {
        self.inner.update(|s| s.sidebar_open = false);
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.subscribe()
    }
}

//! Dashboard filter store

use tokio::sync::watch;

use super::Store;

/// Rows shown in the recent patients table by default
pub const DEFAULT_LIMIT: u32 = 5;

/// At this limit the table already shows everything worth showing
pub const SEE_ALL_LIMIT: u32 = 50;

pub const DEFAULT_DATE_RANGE: &str = "12th Sept - 15th Sept, 2025";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFilters {
    pub limit: u32,
    /// Display label only; it does not filter requests
    pub date_range: String,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            date_range: DEFAULT_DATE_RANGE.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DashboardStore {
    inner: Store<DashboardFilters>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(DashboardFilters::default()),
        }
    }

    pub fn filters(&self) -> DashboardFilters {
        self.inner.get()
    }

    pub fn limit(&self) -> u32 {
        self.inner.get().limit
    }

    pub fn date_range(&self) -> String {
        self.inner.get().date_range
    }

    pub fn set_limit(&self, limit: u32) {
        self.inner.update(|f| f.limit = limit);
    }

    pub fn set_date_range(&self, date_range: impl Into<String>) {
        let date_range = date_range.into();
        self.inner.update(|f| f.date_range = date_range);
    }

    /// Whether the "see all" control is offered
    pub fn shows_see_all(&self) -> bool {
        self.limit() < SEE_ALL_LIMIT
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardFilters> {
        self.inner.subscribe()
    }
}

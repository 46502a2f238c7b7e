//! Query cache
//!
//! Results are cached per [`QueryKey`] and served while fresh. A stale or
//! invalidated entry is refetched under the query's [`RetryPolicy`]. The
//! last error is kept on the entry next to the last good data.
//!
//! Only one fetch runs per key at a time. Callers that arrive while it is
//! running wait for it and share its outcome.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::key::QueryKey;
use super::retry::RetryPolicy;
use crate::api::{ApiError, ApiResult};

/// Errors are shared between the cache and every caller that saw them
pub type QueryError = Arc<ApiError>;
pub type QueryResult<T> = Result<T, QueryError>;

/// Freshness, retention and retry settings for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long a result is served without refetching
    pub stale_time: Duration,
    /// How long an unused entry is kept
    pub gc_time: Duration,
    pub retry: RetryPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
            retry: RetryPolicy::default(),
        }
    }
}

/// Observable state of one query
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<QueryError>,
    /// Fetching with no data to show yet
    pub is_loading: bool,
    pub is_fetching: bool,
    pub is_error: bool,
    pub is_stale: bool,
    pub updated_at: Option<Instant>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            is_fetching: false,
            is_error: false,
            is_stale: true,
            updated_at: None,
        }
    }
}

struct Entry {
    data: Option<Arc<dyn Any + Send + Sync>>,
    error: Option<QueryError>,
    updated_at: Option<Instant>,
    last_used: Instant,
    options: QueryOptions,
    invalidated: bool,
    in_flight: bool,
    /// Held for the duration of a fetch
    gate: Arc<Mutex<()>>,
    /// Completed fetches, successful or not
    generation: u64,
}

impl Entry {
    fn new(options: QueryOptions) -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            last_used: Instant::now(),
            options,
            invalidated: false,
            in_flight: false,
            gate: Arc::new(Mutex::new(())),
            generation: 0,
        }
    }

    /// A fetch is running or waiting on the gate
    fn is_busy(&self) -> bool {
        self.in_flight || Arc::strong_count(&self.gate) > 1
    }

    /// Outcome of the latest completed fetch
    fn outcome<T: Clone + 'static>(&self) -> Option<QueryResult<T>> {
        match &self.error {
            Some(error) => Some(Err(Arc::clone(error))),
            None => self.cached::<T>().map(Ok),
        }
    }

    fn is_stale(&self) -> bool {
        match self.updated_at {
            Some(at) => self.invalidated || at.elapsed() >= self.options.stale_time,
            None => true,
        }
    }

    fn cached<T: Clone + 'static>(&self) -> Option<T> {
        self.data.as_ref().and_then(|d| d.downcast_ref::<T>()).cloned()
    }
}

/// Shared, type-erased query cache
#[derive(Clone, Default)]
pub struct QueryClient {
    entries: Arc<RwLock<HashMap<QueryKey, Entry>>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `key` from cache when fresh, else fetch it
    pub async fn fetch_query<T, F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetcher: F,
    ) -> QueryResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let (gate, seen) = {
            let mut entries = self.entries.write().await;
            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(options));
            entry.options = options;
            entry.last_used = Instant::now();

            if !entry.is_stale() {
                if let Some(value) = entry.cached::<T>() {
                    tracing::trace!(key = %key, "Query cache hit");
                    return Ok(value);
                }
            }
            (Arc::clone(&entry.gate), entry.generation)
        };

        let _fetching = gate.lock().await;
        {
            let mut entries = self.entries.write().await;
            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(options));

            if entry.generation != seen {
                if let Some(outcome) = entry.outcome::<T>() {
                    tracing::trace!(key = %key, "Joined in-flight query");
                    return outcome;
                }
            }
            entry.in_flight = true;
        }

        tracing::debug!(key = %key, "Fetching query");
        let result = options.retry.run(fetcher).await;

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(options));
        entry.in_flight = false;
        entry.generation += 1;
        entry.last_used = Instant::now();

        match result {
            Ok(value) => {
                entry.data = Some(Arc::new(value.clone()));
                entry.error = None;
                entry.updated_at = Some(Instant::now());
                entry.invalidated = false;
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Query failed");
                let error = Arc::new(e);
                entry.error = Some(Arc::clone(&error));
                Err(error)
            }
        }
    }

    /// Current state of `key`; an unknown key reads as empty and stale
    pub async fn query_state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                let data = entry.cached::<T>();
                QueryState {
                    is_loading: entry.in_flight && data.is_none(),
                    is_fetching: entry.in_flight,
                    is_error: entry.error.is_some(),
                    is_stale: entry.is_stale(),
                    error: entry.error.clone(),
                    updated_at: entry.updated_at,
                    data,
                }
            }
            None => QueryState::default(),
        }
    }

    /// Mark every entry under `prefix` stale; returns how many matched
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        tracing::debug!(prefix = %prefix, count, "Invalidated queries");
        count
    }

    /// Drop idle entries unused for longer than their gc window
    pub async fn collect_garbage(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_busy() || entry.last_used.elapsed() <= entry.options.gc_time);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

//! # iPrescribe Admin
//!
//! Client library for the iPrescribe admin dashboard: a typed REST client,
//! client-side state stores, a caching query layer and the login flow.
//!
//! ## Features
//!
//! - **Typed API client**: Bearer-token injection, timeouts and normalized errors
//! - **Query cache**: Staleness windows, garbage collection and retry with backoff
//! - **Observable stores**: Auth (persisted), theme, dashboard filters and UI
//! - **Mock API**: Local Axum server with fixture data for development and tests
//!
//! ## Modules
//!
//! - [`api`]: Admin API client and endpoint groups
//! - [`query`]: Cached, retried dashboard queries
//! - [`store`]: Client state stores
//! - [`session`]: Login and logout
//! - [`storage`]: Durable key-value storage
//! - [`mock`]: Mock admin API server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iprescribe::api::{ApiClient, DashboardApi};
//! use iprescribe::config::Config;
//! use iprescribe::query::{DashboardQueries, QueryClient, RetryPolicy};
//! use iprescribe::session::AdminSession;
//! use iprescribe::storage::{FileStore, KeyValueStore};
//! use iprescribe::store::Stores;
//! use iprescribe::validation::LoginForm;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.data_dir)?);
//!     let stores = Stores::open(Arc::clone(&storage));
//!     let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&storage))?);
//!
//!     // Sign in; the token is picked up by every later request
//!     let session = AdminSession::new(Arc::clone(&client), storage, stores.auth.clone());
//!     session.login(&LoginForm::new("admin@careoneclinics.com", "password123")).await?;
//!
//!     let queries = DashboardQueries::new(
//!         QueryClient::new(),
//!         DashboardApi::new(client, config.api.placeholder_fallback),
//!         stores.dashboard.clone(),
//!         RetryPolicy::new(config.api.retry_attempts),
//!     );
//!
//!     let view = queries.dashboard_data().await;
//!     if let Some(stats) = view.stats {
//!         println!("{} stat cards", stats.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod mock;
pub mod models;
pub mod query;
pub mod session;
pub mod storage;
pub mod store;
pub mod theme;
pub mod validation;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, AuthApi, DashboardApi};

pub use models::{
    AuthUser, ChartDataPoint, DashboardCharts, DashboardData, DashboardStat, PatientStatus,
    RecentPatient, Role, StatCategory,
};

pub use query::{CombinedDashboard, DashboardQueries, QueryClient, QueryKey, RetryPolicy};

pub use session::{AdminSession, SessionError};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use store::{AuthStore, DashboardStore, Stores, ThemeMode, ThemeStore, UiStore};

pub use config::{ApiSettings, Config, ConfigError, LoggingConfig, StorageSettings};

pub use validation::{LoginForm, ValidationErrors};

//! iPrescribe Admin API
//!
//! Typed access to the admin REST API.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /admin/dashboard/stats` - Stat cards and chart sections
//! - `GET /admin/patients?limit=N` - Recent patient sign-ups
//!
//! ## Auth
//! - `POST /auth/login` - Exchange credentials for a bearer token
//!
//! # Example
//!
//! ```rust,no_run
//! use iprescribe::api::{ApiClient, DashboardApi};
//! use iprescribe::config::ApiSettings;
//! use iprescribe::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new(&ApiSettings::default(), Arc::new(MemoryStore::new()))?);
//!     let dashboard = DashboardApi::new(client, true);
//!
//!     for stat in dashboard.get_stats().await? {
//!         println!("{}: {}", stat.label, stat.formatted_value());
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod placeholder;

pub use auth::AuthApi;
pub use client::{ApiClient, RequestOptions};
pub use dashboard::{DashboardApi, DEFAULT_PATIENT_LIMIT};
pub use error::{ApiError, ApiResult};

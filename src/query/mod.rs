//! Data-fetching Layer
//!
//! - **key**: Hierarchical cache keys with prefix matching
//! - **retry**: Capped exponential backoff
//! - **cache**: `QueryClient`, staleness and garbage collection
//! - **dashboard**: Dashboard queries and the combined view

pub mod cache;
pub mod dashboard;
pub mod key;
pub mod retry;

pub use cache::{QueryClient, QueryError, QueryOptions, QueryResult, QueryState};
pub use dashboard::{CombinedDashboard, DashboardQueries};
pub use key::QueryKey;
pub use retry::RetryPolicy;

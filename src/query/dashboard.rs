//! Dashboard queries
//!
//! Cached, retried access to the dashboard endpoints plus the combined view
//! the dashboard page renders from.

use std::time::Duration;

use super::cache::{QueryClient, QueryError, QueryOptions, QueryResult};
use super::key::QueryKey;
use super::retry::RetryPolicy;
use crate::api::DashboardApi;
use crate::models::{DashboardCharts, DashboardStat, RecentPatient};
use crate::store::DashboardStore;

pub const STATS_STALE_TIME: Duration = Duration::from_secs(5 * 60);
pub const STATS_GC_TIME: Duration = Duration::from_secs(10 * 60);
pub const PATIENTS_STALE_TIME: Duration = Duration::from_secs(2 * 60);
pub const PATIENTS_GC_TIME: Duration = Duration::from_secs(5 * 60);

/// Cache keys of the dashboard namespace
pub mod keys {
    use super::QueryKey;

    pub fn dashboard() -> QueryKey {
        QueryKey::new(["dashboard"])
    }

    pub fn stats() -> QueryKey {
        dashboard().with("stats")
    }

    pub fn charts() -> QueryKey {
        dashboard().with("charts")
    }

    pub fn recent_patients(limit: u32) -> QueryKey {
        dashboard().with("recent-patients").with(limit)
    }
}

/// Stats and patients as one view
#[derive(Debug, Clone)]
pub struct CombinedDashboard {
    pub limit: u32,
    pub stats: Option<Vec<DashboardStat>>,
    pub recent_patients: Option<Vec<RecentPatient>>,
    pub is_error: bool,
    /// First error, stats before patients
    pub error: Option<QueryError>,
}

impl CombinedDashboard {
    pub fn from_results(
        limit: u32,
        stats: QueryResult<Vec<DashboardStat>>,
        recent_patients: QueryResult<Vec<RecentPatient>>,
    ) -> Self {
        let (stats, stats_error) = split(stats);
        let (recent_patients, patients_error) = split(recent_patients);
        let error = stats_error.or(patients_error);

        Self {
            limit,
            stats,
            recent_patients,
            is_error: error.is_some(),
            error,
        }
    }
}

fn split<T>(result: QueryResult<T>) -> (Option<T>, Option<QueryError>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(e) => (None, Some(e)),
    }
}

/// Dashboard queries over a shared cache
#[derive(Clone)]
pub struct DashboardQueries {
    client: QueryClient,
    api: DashboardApi,
    filters: DashboardStore,
    retry: RetryPolicy,
}

impl DashboardQueries {
    pub fn new(client: QueryClient, api: DashboardApi, filters: DashboardStore, retry: RetryPolicy) -> Self {
        Self {
            client,
            api,
            filters,
            retry,
        }
    }

    pub fn query_client(&self) -> &QueryClient {
        &self.client
    }

    pub fn stats_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: STATS_STALE_TIME,
            gc_time: STATS_GC_TIME,
            retry: self.retry,
        }
    }

    pub fn patients_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: PATIENTS_STALE_TIME,
            gc_time: PATIENTS_GC_TIME,
            retry: self.retry,
        }
    }

    pub async fn stats(&self) -> QueryResult<Vec<DashboardStat>> {
        let api = &self.api;
        self.client
            .fetch_query(keys::stats(), self.stats_options(), move || api.get_stats())
            .await
    }

    pub async fn recent_patients(&self, limit: u32) -> QueryResult<Vec<RecentPatient>> {
        let api = &self.api;
        self.client
            .fetch_query(keys::recent_patients(limit), self.patients_options(), move || {
                api.get_recent_patients(limit)
            })
            .await
    }

    pub async fn charts(&self) -> QueryResult<DashboardCharts> {
        let api = &self.api;
        self.client
            .fetch_query(keys::charts(), self.stats_options(), move || api.get_charts())
            .await
    }

    /// Stats and patients at the store's current limit, fetched concurrently
    pub async fn dashboard_data(&self) -> CombinedDashboard {
        let limit = self.filters.limit();
        let (stats, recent_patients) = tokio::join!(self.stats(), self.recent_patients(limit));
        CombinedDashboard::from_results(limit, stats, recent_patients)
    }

    /// Mark the whole dashboard namespace stale
    pub async fn refresh_all(&self) -> usize {
        self.client.invalidate(&keys::dashboard()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::StatCategory;
    use std::sync::Arc;

    #[test]
    fn test_keys() {
        assert_eq!(keys::dashboard().parts(), ["dashboard"]);
        assert_eq!(keys::stats().parts(), ["dashboard", "stats"]);
        assert_eq!(keys::recent_patients(5).parts(), ["dashboard", "recent-patients", "5"]);
        assert!(keys::recent_patients(5).starts_with(&keys::dashboard()));
    }

    #[test]
    fn test_combined_success() {
        let stat = DashboardStat::from_percentage("Total Patients", 1, 0.0, StatCategory::Patients);
        let view = CombinedDashboard::from_results(5, Ok(vec![stat]), Ok(vec![]));
        assert!(!view.is_error);
        assert!(view.error.is_none());
        assert_eq!(view.stats.unwrap().len(), 1);
        assert_eq!(view.recent_patients.unwrap().len(), 0);
    }

    #[test]
    fn test_combined_reports_first_error() {
        let stats_err = Arc::new(ApiError::from_error_body(500, "Internal Server Error", ""));
        let patients_err = Arc::new(ApiError::from_error_body(401, "Unauthorized", ""));

        let view = CombinedDashboard::from_results(5, Err(stats_err), Err(patients_err));
        assert!(view.is_error);
        assert_eq!(view.error.unwrap().status(), Some(500));

        let patients_only = CombinedDashboard::from_results(
            5,
            Ok(vec![]),
            Err(Arc::new(ApiError::from_error_body(401, "Unauthorized", ""))),
        );
        assert!(patients_only.is_error);
        assert!(patients_only.stats.is_some());
        assert_eq!(patients_only.error.unwrap().status(), Some(401));
    }
}

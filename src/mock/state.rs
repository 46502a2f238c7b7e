//! Mock server state

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@careoneclinics.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

/// Shared state for all mock handlers
#[derive(Clone)]
pub struct MockState {
    pub admin_email: String,
    pub admin_password: String,
    /// Tokens issued by `/auth/login`
    tokens: Arc<RwLock<HashSet<String>>>,
    /// Answer the stats endpoint with this status and a plain-text body
    pub stats_failure: Option<u16>,
    /// Serve stats and patients without a bearer token
    pub open_access: bool,
    pub start_time: Instant,
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    pub fn new() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            tokens: Arc::new(RwLock::new(HashSet::new())),
            stats_failure: None,
            open_access: false,
            start_time: Instant::now(),
        }
    }

    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_email = email.into();
        self.admin_password = password.into();
        self
    }

    pub fn with_stats_failure(mut self, status: u16) -> Self {
        self.stats_failure = Some(status);
        self
    }

    pub fn with_open_access(mut self) -> Self {
        self.open_access = true;
        self
    }

    pub fn credentials_match(&self, email: &str, password: &str) -> bool {
        email.eq_ignore_ascii_case(&self.admin_email) && password == self.admin_password
    }

    pub async fn issue_token(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.write().await.insert(token.clone());
        token
    }

    pub async fn is_valid_token(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

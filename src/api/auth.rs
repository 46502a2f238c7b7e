//! Authentication endpoint

use std::sync::Arc;

use super::client::ApiClient;
use super::dto::{LoginRequest, LoginResponse};
use super::error::ApiResult;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Auth API bound to a client
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token
    ///
    /// The email is trimmed before sending. The token is not stored here;
    /// see [`crate::session::AdminSession::login`].
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest::new(email, password);
        tracing::debug!(email = %request.email, "Submitting login");
        self.client.post(LOGIN_ENDPOINT, Some(&request)).await
    }
}

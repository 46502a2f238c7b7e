//! Admin API HTTP Client
//!
//! Thin wrapper over `reqwest` that resolves endpoints against the base URL,
//! attaches JSON headers and the stored bearer token, enforces the request
//! timeout and turns non-2xx responses into [`ApiError::Http`].
//!
//! The client never retries; retry policy belongs to the query layer.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::{ApiError, ApiResult};
use crate::config::ApiSettings;
use crate::storage::{KeyValueStore, AUTH_TOKEN_KEY};

/// Extra per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers applied after the defaults, overriding them on conflict
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client bound to one admin API base URL
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    storage: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client; the token is looked up in `storage` on every request
    pub fn new(settings: &ApiSettings, storage: Arc<dyn KeyValueStore>) -> ApiResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(settings.timeout_ms),
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an endpoint such as `/admin/patients?limit=5`
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `endpoint` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.get_with(endpoint, &RequestOptions::default()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::GET, endpoint, None, options).await
    }

    /// POST `endpoint` with an optional JSON body and decode the response
    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with(endpoint, body, &RequestOptions::default()).await
    }

    pub async fn post_with<T, B>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(body) => Some(serde_json::to_vec(body).map_err(|e| {
                ApiError::InvalidRequest(format!("Failed to serialize request body: {}", e))
            })?),
            None => None,
        };

        self.request(Method::POST, endpoint, body, options).await
    }

    /// Stored bearer token, if any
    fn token(&self) -> Option<String> {
        match self.storage.get_item(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read auth token, sending unauthenticated");
                None
            }
        }
    }

    /// Default headers, bearer token, then caller overrides
    fn headers(&self, options: &RequestOptions) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid auth token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid header {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        let url = self.url(endpoint);
        let headers = self.headers(options)?;
        let started = Instant::now();

        tracing::debug!(method = %method, url = %url, "Sending API request");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(headers)
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API response received"
        );

        if !status.is_success() {
            let status_text = reason_phrase(&response);
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_error_body(status.as_u16(), &status_text, &body);
            tracing::debug!(status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.timeout.as_millis() as u64)
        } else {
            ApiError::Network(error)
        }
    }
}

/// Reason phrase the server sent, else the canonical one for the status
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or("")
        .to_string()
}

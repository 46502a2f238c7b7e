//! API Error Types
//!
//! Normalizes transport failures and non-2xx responses into one error type.
//! An HTTP error displays as the server's `message` when it sent one.

use serde_json::{json, Value};
use thiserror::Error;

/// Errors returned by the admin API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request aborted after the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Http {
        status: u16,
        status_text: String,
        message: String,
        /// Parsed error body, or a synthesized `{"message": ...}`
        data: Value,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Stats payload lacks an optional section
    #[error("Response is missing the {0} section")]
    MissingSection(&'static str),

    /// The request could not be built (bad header, unserializable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an HTTP error from a raw error body
    ///
    /// A JSON body is kept as `data` and its `message` used when non-empty,
    /// else `"API Error: <code> <statusText>"`. A body that is not JSON
    /// yields `"HTTP <code>: <statusText>"`.
    pub fn from_error_body(status: u16, status_text: &str, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(data) => {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("API Error: {} {}", status, status_text));

                ApiError::Http {
                    status,
                    status_text: status_text.to_string(),
                    message,
                    data,
                }
            }
            Err(_) => {
                let message = format!("HTTP {}: {}", status, status_text);
                ApiError::Http {
                    status,
                    status_text: status_text.to_string(),
                    data: json!({ "message": message }),
                    message,
                }
            }
        }
    }

    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error body attached to an HTTP error
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Http { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Whether repeating the same request could succeed
    ///
    /// Client errors are final except request timeout (408) and rate
    /// limiting (429). Only consulted by a `RetryPolicy` built with
    /// `skip_client_errors`.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http { status, .. } => !(400..500).contains(status) || *status == 408 || *status == 429,
            ApiError::Network(_) | ApiError::Timeout(_) => true,
            ApiError::Decode(_) | ApiError::MissingSection(_) | ApiError::InvalidRequest(_) => false,
        }
    }

    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used() {
        let err = ApiError::from_error_body(401, "Unauthorized", r#"{"message":"Unauthenticated."}"#);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Unauthenticated.");
        assert_eq!(err.data().unwrap()["message"], "Unauthenticated.");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_non_json_body_falls_back_to_status_text() {
        let err = ApiError::from_error_body(500, "Internal Server Error", "<html>oops</html>");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.data().unwrap()["message"], "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_empty_body_falls_back_to_status_text() {
        let err = ApiError::from_error_body(502, "Bad Gateway", "");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_json_without_message() {
        let err = ApiError::from_error_body(422, "Unprocessable Entity", r#"{"errors":{"email":["taken"]}}"#);
        assert_eq!(err.to_string(), "API Error: 422 Unprocessable Entity");
        assert!(err.data().unwrap().get("errors").is_some());
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let err = ApiError::from_error_body(500, "Internal Server Error", r#"{"message":""}"#);
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[test]
    fn test_retryable() {
        assert!(!ApiError::from_error_body(401, "Unauthorized", "").is_retryable());
        assert!(!ApiError::from_error_body(404, "Not Found", "").is_retryable());
        assert!(ApiError::from_error_body(429, "Too Many Requests", "").is_retryable());
        assert!(ApiError::from_error_body(408, "Request Timeout", "").is_retryable());
        assert!(ApiError::from_error_body(503, "Service Unavailable", "").is_retryable());
        assert!(ApiError::Timeout(10_000).is_retryable());
        assert!(!ApiError::Decode("bad".into()).is_retryable());
    }
}

//! HTTP-specific error types.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: A non-2xx response whose body is not an error envelope
//! - [`HttpError`]: Unified error type for the transport layer
//!
//! Nothing in this layer is retried; every failure is returned to the
//! caller of the request that caused it.
//!
//! # Example
//!
//! ```rust,ignore
//! use amazon_product::clients::{HttpClient, HttpError};
//!
//! match client.get(&url).await {
//!     Ok(response) => println!("{} bytes", response.body.len()),
//!     Err(HttpError::Response(e)) => println!("HTTP {}: {}", e.code, e.message),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(HttpError::Client(e)) => println!("Transport setup failed: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response that
/// carries no error envelope.
///
/// # Example
///
/// ```rust
/// use amazon_product::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: "Service Unavailable".to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body as text.
    pub message: String,
    /// Request id for error reporting (from the `x-amzn-RequestId` header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response without an error envelope.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The transport could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_without_reference() {
        let error = HttpResponseError {
            code: 500,
            message: "Internal Server Error".to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_http_response_error_keeps_request_id() {
        let error = HttpResponseError {
            code: 503,
            message: "busy".to_string(),
            error_reference: Some("abc-123".to_string()),
        };
        assert_eq!(error.error_reference.as_deref(), Some("abc-123"));
        assert_eq!(error.to_string(), "HTTP 503: busy");
    }

    #[test]
    fn test_client_error_message() {
        let error = HttpError::Client("TLS backend unavailable".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to create HTTP client: TLS backend unavailable"
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            error_reference: None,
        };
        let _ = error;
    }
}

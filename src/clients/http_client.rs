//! HTTP transport for signed requests.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;
use crate::config::ProductApiConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for sending signed requests.
///
/// The client only transports bytes: it sends a GET to a fully signed URL
/// and returns status, headers and body. Interpreting the body is up to
/// [`crate::response`]. There is no retry.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration's transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use amazon_product::{ProductApiConfig, AccessKey, SecretKey};
    /// use amazon_product::clients::HttpClient;
    ///
    /// let config = ProductApiConfig::builder()
    ///     .access_key(AccessKey::new("key").unwrap())
    ///     .secret_key(SecretKey::new("secret").unwrap())
    ///     .user_agent_prefix("MyApp/1.0")
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert!(client.user_agent().starts_with("MyApp/1.0 | "));
    /// ```
    pub fn new(config: &ProductApiConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Amazon Product API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client, user_agent })
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sends a GET request to a signed URL.
    ///
    /// Any status code is returned as a response; only transport failures
    /// are errors here.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures, timeouts, or
    /// if the body cannot be read.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let res = self.client.get(url).send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        if !(200..=299).contains(&code) {
            tracing::debug!(status = code, "Service answered with non-success status");
        }

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

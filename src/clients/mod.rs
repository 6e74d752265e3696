//! HTTP transport for the Product Advertising API.
//!
//! This module sends signed GET requests and hands back raw responses.
//! Request signing lives in [`crate::auth`]; interpreting bodies lives in
//! [`crate::response`].
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client (reqwest, rustls)
//! - [`HttpResponse`]: Status, headers and raw body
//! - [`HttpError`]: Transport-level failures
//!
//! # Example
//!
//! ```rust,ignore
//! use amazon_product::clients::HttpClient;
//!
//! let client = HttpClient::new(&config)?;
//! let response = client.get(&signed.url).await?;
//! println!("{} {}", response.code, response.body_text());
//! ```
//!
//! # Retry Behavior
//!
//! None. A throttled request surfaces as
//! [`crate::response::AwsErrorKind::TooManyRequests`] and the caller decides
//! what to do.

mod errors;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;

//! Configuration error types for the Product Advertising API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Errors raised while talking to the service live in
//! [`crate::api::ApiError`].
//!
//! # Example
//!
//! ```rust
//! use amazon_product::{SecretKey, ConfigError};
//!
//! let result = SecretKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptySecretKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// These are raised before any request is sent, so a `ConfigError` always
/// means nothing reached the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access key id cannot be empty.
    #[error("Access key id cannot be empty. Please provide a valid AWS access key id.")]
    EmptyAccessKey,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid AWS secret access key.")]
    EmptySecretKey,

    /// Associate tag cannot be empty when given.
    #[error("Associate tag cannot be empty. Omit it or provide a valid associate tag.")]
    EmptyAssociateTag,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2011-08-01').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Locale is not one of the supported marketplaces.
    #[error("Unknown locale '{locale}'. Expected one of: ca, de, fr, jp, uk, us.")]
    UnknownLocale {
        /// The locale that was provided.
        locale: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://ecs.amazonaws.com/onca/xml').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

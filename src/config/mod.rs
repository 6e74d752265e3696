//! Configuration types for the Product Advertising API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ProductApiConfig`]: The main configuration struct holding all client settings
//! - [`ProductApiConfigBuilder`]: A builder for constructing [`ProductApiConfig`] instances
//! - [`AccessKey`]: A validated access key id newtype
//! - [`SecretKey`]: A validated secret key newtype with masked debug output
//! - [`AssociateTag`]: A validated associate tag
//! - [`Locale`] and [`Endpoint`]: Where requests are sent
//! - [`ApiVersion`]: The API version to request
//!
//! # Example
//!
//! ```rust
//! use amazon_product::{ProductApiConfig, AccessKey, SecretKey, Locale};
//!
//! let config = ProductApiConfig::builder()
//!     .access_key(AccessKey::new("my-access-key").unwrap())
//!     .secret_key(SecretKey::new("my-secret").unwrap())
//!     .locale(Locale::De)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().host(), "ecs.amazonaws.de");
//! ```

mod locale;
mod newtypes;
mod version;

pub use locale::{Endpoint, Locale, DEFAULT_PATH};
pub use newtypes::{AccessKey, AssociateTag, SecretKey};
pub use version::ApiVersion;

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for the Product Advertising API client.
///
/// # Thread Safety
///
/// `ProductApiConfig` is `Clone`, `Send`, and `Sync`. Credentials are
/// read-only for the lifetime of the configuration.
#[derive(Clone, Debug)]
pub struct ProductApiConfig {
    credentials: Credentials,
    associate_tag: Option<AssociateTag>,
    locale: Locale,
    endpoint: Endpoint,
    api_version: ApiVersion,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ProductApiConfig {
    /// Creates a new builder for constructing a `ProductApiConfig`.
    #[must_use]
    pub fn builder() -> ProductApiConfigBuilder {
        ProductApiConfigBuilder::new()
    }

    /// Returns the signing credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the associate tag, if configured.
    #[must_use]
    pub const fn associate_tag(&self) -> Option<&AssociateTag> {
        self.associate_tag.as_ref()
    }

    /// Returns the marketplace locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the endpoint requests are sent to.
    ///
    /// This is the locale's endpoint unless an override was configured.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ProductApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProductApiConfig>();
};

/// Builder for constructing [`ProductApiConfig`] instances.
///
/// Required fields are `access_key` and `secret_key`.
///
/// # Defaults
///
/// - `locale`: [`Locale::Us`]
/// - `endpoint`: derived from the locale
/// - `api_version`: [`ApiVersion::latest`]
/// - `associate_tag`, `timeout`, `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ProductApiConfigBuilder {
    access_key: Option<AccessKey>,
    secret_key: Option<SecretKey>,
    associate_tag: Option<AssociateTag>,
    locale: Option<Locale>,
    endpoint: Option<Endpoint>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ProductApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access key id (required).
    #[must_use]
    pub fn access_key(mut self, key: AccessKey) -> Self {
        self.access_key = Some(key);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Sets the associate tag added to every request.
    #[must_use]
    pub fn associate_tag(mut self, tag: AssociateTag) -> Self {
        self.associate_tag = Some(tag);
        self
    }

    /// Sets the marketplace locale.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Overrides the endpoint derived from the locale.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the transport timeout applied to each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProductApiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_key` or
    /// `secret_key` are not set.
    pub fn build(self) -> Result<ProductApiConfig, ConfigError> {
        let access_key = self.access_key.ok_or(ConfigError::MissingRequiredField {
            field: "access_key",
        })?;
        let secret_key = self.secret_key.ok_or(ConfigError::MissingRequiredField {
            field: "secret_key",
        })?;

        let locale = self.locale.unwrap_or_default();
        let endpoint = self.endpoint.unwrap_or_else(|| locale.endpoint());

        Ok(ProductApiConfig {
            credentials: Credentials::new(access_key, secret_key),
            associate_tag: self.associate_tag,
            locale,
            endpoint,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> ProductApiConfigBuilder {
        ProductApiConfig::builder()
            .access_key(AccessKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_access_key() {
        let result = ProductApiConfigBuilder::new()
            .secret_key(SecretKey::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_key"
            })
        ));
    }

    #[test]
    fn test_builder_requires_secret_key() {
        let result = ProductApiConfigBuilder::new()
            .access_key(AccessKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = minimal_builder().build().unwrap();

        assert_eq!(config.locale(), Locale::Us);
        assert_eq!(config.endpoint(), &Locale::Us.endpoint());
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.associate_tag().is_none());
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_endpoint_follows_locale_unless_overridden() {
        let config = minimal_builder().locale(Locale::Jp).build().unwrap();
        assert_eq!(config.endpoint().host(), "ecs.amazonaws.jp");

        let endpoint = Endpoint::parse("http://localhost:9000").unwrap();
        let config = minimal_builder()
            .locale(Locale::Jp)
            .endpoint(endpoint.clone())
            .build()
            .unwrap();
        assert_eq!(config.locale(), Locale::Jp);
        assert_eq!(config.endpoint(), &endpoint);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = minimal_builder()
            .associate_tag(AssociateTag::new("tag-20").unwrap())
            .api_version(ApiVersion::V2009_11_01)
            .timeout(Duration::from_secs(5))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.associate_tag().unwrap().as_ref(), "tag-20");
        assert_eq!(config.api_version(), &ApiVersion::V2009_11_01);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = ProductApiConfig::builder()
            .access_key(AccessKey::new("key").unwrap())
            .secret_key(SecretKey::new("very-secret-value").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ProductApiConfig"));
        assert!(!debug_str.contains("very-secret-value"));
    }
}

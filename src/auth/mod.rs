//! Credentials and request signing.
//!
//! Every Product Advertising API request is authenticated by an HMAC-SHA256
//! signature over a canonical form of the query string. This module holds
//! the credential pair and the signer.
//!
//! # Overview
//!
//! - [`Credentials`]: The access key id and secret key of one account
//! - [`signing`]: Canonicalization and signature computation
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use amazon_product::auth::{signing, Credentials};
//! use chrono::{TimeZone, Utc};
//!
//! let credentials = Credentials::from_keys("AKID", "secret").unwrap();
//! let mut params = BTreeMap::new();
//! params.insert("Operation".to_string(), "ItemLookup".to_string());
//!
//! let timestamp = Utc.with_ymd_and_hms(2010, 1, 1, 12, 0, 0).unwrap();
//! let signed = signing::sign("GET", "ecs.amazonaws.com", "/onca/xml", &params, &credentials, timestamp);
//! assert!(signed.canonical_query.starts_with("AWSAccessKeyId=AKID&Operation=ItemLookup"));
//! ```

pub mod signing;

use crate::config::{AccessKey, SecretKey};
use crate::error::ConfigError;

/// The access key id and secret key of one account.
///
/// Credentials are immutable and cheap to clone; a single instance can be
/// shared read-only across any number of concurrent requests. The secret is
/// masked in `Debug` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    access_key: AccessKey,
    secret_key: SecretKey,
}

impl Credentials {
    /// Creates credentials from validated keys.
    #[must_use]
    pub const fn new(access_key: AccessKey, secret_key: SecretKey) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// Creates credentials from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessKey`] or [`ConfigError::EmptySecretKey`]
    /// if either value is empty.
    pub fn from_keys(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            AccessKey::new(access_key)?,
            SecretKey::new(secret_key)?,
        ))
    }

    /// Returns the access key id.
    #[must_use]
    pub const fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

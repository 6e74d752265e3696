//! Marketplace locales and the service endpoints they map to.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Request path shared by all marketplaces.
pub const DEFAULT_PATH: &str = "/onca/xml";

/// An Amazon marketplace.
///
/// The locale selects the endpoint host and therefore the catalog and the
/// response language.
///
/// # Example
///
/// ```rust
/// use amazon_product::Locale;
///
/// let locale: Locale = "uk".parse().unwrap();
/// assert_eq!(locale.host(), "ecs.amazonaws.co.uk");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// amazon.ca
    Ca,
    /// amazon.de
    De,
    /// amazon.fr
    Fr,
    /// amazon.co.jp
    Jp,
    /// amazon.co.uk
    Uk,
    /// amazon.com
    #[default]
    Us,
}

impl Locale {
    /// Returns every supported locale.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [Self::Ca, Self::De, Self::Fr, Self::Jp, Self::Uk, Self::Us]
    }

    /// Returns the short code (`us`, `de`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ca => "ca",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Jp => "jp",
            Self::Uk => "uk",
            Self::Us => "us",
        }
    }

    /// Returns the service host for this marketplace.
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Ca => "ecs.amazonaws.ca",
            Self::De => "ecs.amazonaws.de",
            Self::Fr => "ecs.amazonaws.fr",
            Self::Jp => "ecs.amazonaws.jp",
            Self::Uk => "ecs.amazonaws.co.uk",
            Self::Us => "ecs.amazonaws.com",
        }
    }

    /// Returns the HTTPS endpoint for this marketplace.
    #[must_use]
    pub fn endpoint(self) -> Endpoint {
        Endpoint {
            scheme: "https".to_string(),
            host: self.host().to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == code)
            .ok_or(ConfigError::UnknownLocale { locale: code })
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Where signed requests are sent.
///
/// Normally derived from a [`Locale`]; an explicit endpoint is useful for
/// proxies and for tests against a local mock server. The host is what gets
/// signed, so it is stored lower-cased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    host: String,
    path: String,
}

impl Endpoint {
    /// Parses an endpoint from a URL such as `https://ecs.amazonaws.com/onca/xml`.
    ///
    /// A URL without a path gets [`DEFAULT_PATH`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the scheme or host is missing,
    /// or if the URL carries a query string.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        let invalid = || ConfigError::InvalidEndpoint {
            url: url.to_string(),
        };

        let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        if rest.contains(['?', '#']) {
            return Err(invalid());
        }

        let (host, path) = rest
            .find('/')
            .map_or((rest, ""), |idx| (&rest[..idx], &rest[idx..]));
        if host.is_empty() {
            return Err(invalid());
        }

        let path = match path.trim_end_matches('/') {
            "" => DEFAULT_PATH.to_string(),
            p => p.to_string(),
        };

        Ok(Self {
            scheme: scheme.to_lowercase(),
            host: host.to_lowercase(),
            path,
        })
    }

    /// Returns the URL scheme (`https` for the real service).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the lower-cased host, including a port if one was given.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `scheme://host/path` without a query string.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.path)
    }
}

impl From<Locale> for Endpoint {
    fn from(locale: Locale) -> Self {
        locale.endpoint()
    }
}

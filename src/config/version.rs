//! Product Advertising API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Product Advertising API to request. The version is sent with every
//! request and echoed back in the default namespace of each response
//! (`http://webservices.amazon.com/AWSECommerceService/<version>`).

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Product Advertising API version.
///
/// Versions are dated (`YYYY-MM-DD`). Known releases have their own
/// variant; anything else that looks like a date parses to `Custom`.
///
/// # Example
///
/// ```rust
/// use amazon_product::ApiVersion;
///
/// let version: ApiVersion = "2009-11-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2009_11_01);
/// assert_eq!(format!("{}", ApiVersion::V2011_08_01), "2011-08-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2009-10-01.
    V2009_10_01,
    /// API version 2009-11-01.
    V2009_11_01,
    /// API version 2010-09-01.
    V2010_09_01,
    /// API version 2010-11-01.
    V2010_11_01,
    /// API version 2011-08-01.
    V2011_08_01,
    /// Custom version string for unlisted releases.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2011_08_01
    }

    /// Returns all known versions, oldest first.
    #[must_use]
    pub fn known_versions() -> Vec<Self> {
        vec![
            Self::V2009_10_01,
            Self::V2009_11_01,
            Self::V2010_09_01,
            Self::V2010_11_01,
            Self::V2011_08_01,
        ]
    }

    /// Returns the version as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2009_10_01 => "2009-10-01",
            Self::V2009_11_01 => "2009-11-01",
            Self::V2010_09_01 => "2010-09-01",
            Self::V2010_11_01 => "2010-11-01",
            Self::V2011_08_01 => "2011-08-01",
            Self::Custom(s) => s,
        }
    }

    /// Returns the XML namespace the service uses for responses of this version.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!(
            "http://webservices.amazon.com/AWSECommerceService/{}",
            self.as_str()
        )
    }

    fn is_valid_version_format(s: &str) -> bool {
        // Format: YYYY-MM-DD
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return false;
        }
        let widths = [4, 2, 2];
        parts
            .iter()
            .zip(widths)
            .all(|(part, width)| part.len() == width && part.chars().all(|c| c.is_ascii_digit()))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s {
            "2009-10-01" => Ok(Self::V2009_10_01),
            "2009-11-01" => Ok(Self::V2009_11_01),
            "2010-09-01" => Ok(Self::V2010_09_01),
            "2010-11-01" => Ok(Self::V2010_11_01),
            "2011-08-01" => Ok(Self::V2011_08_01),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

impl Serialize for ApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!(
            "2009-10-01".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2009_10_01
        );
        assert_eq!(
            "2011-08-01".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2011_08_01
        );
    }

    #[test]
    fn test_api_version_parses_unlisted_dates_as_custom() {
        let version: ApiVersion = "2013-08-01".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2013-08-01".to_string()));
        assert_eq!(version.to_string(), "2013-08-01");
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("2009-11".parse::<ApiVersion>().is_err());
        assert!("09-11-01".parse::<ApiVersion>().is_err());
        assert!("2009-1a-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_namespace_contains_version() {
        let ns = ApiVersion::V2009_11_01.namespace();
        assert!(ns.ends_with("/AWSECommerceService/2009-11-01"));
    }

    #[test]
    fn test_latest_is_last_known_version() {
        assert_eq!(
            ApiVersion::known_versions().last(),
            Some(&ApiVersion::latest())
        );
    }
}

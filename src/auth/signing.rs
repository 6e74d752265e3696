//! Canonical query construction and HMAC-SHA256 request signatures.
//!
//! The service verifies a request by rebuilding this string to sign:
//!
//! ```text
//! GET\n
//! ecs.amazonaws.com\n
//! /onca/xml\n
//! AWSAccessKeyId=...&Operation=ItemLookup&...&Timestamp=...
//! ```
//!
//! and comparing `Base64(HMAC-SHA256(SecretKey, StringToSign))` with the
//! `Signature` parameter. The canonical query must be byte-for-byte the one
//! that is transmitted, so the same string is used for both.
//!
//! # Example
//!
//! ```rust
//! use amazon_product::auth::signing::compute_signature;
//! use amazon_product::SecretKey;
//!
//! let secret = SecretKey::new("key").unwrap();
//! let sig = compute_signature("message", &secret);
//! assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
//! ```

use std::collections::BTreeMap;
use std::string::FromUtf8Error;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::config::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Parameter carrying the request timestamp.
pub const TIMESTAMP_PARAM: &str = "Timestamp";

/// Parameter carrying the access key id.
pub const ACCESS_KEY_PARAM: &str = "AWSAccessKeyId";

/// Parameter carrying the computed signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// `strftime` format of the `Timestamp` parameter (ISO-8601, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A canonical query together with its signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedQuery {
    /// Sorted, percent-encoded `key=value` pairs joined by `&`.
    pub canonical_query: String,
    /// Base64-encoded HMAC-SHA256 of the string to sign.
    pub signature: String,
}

impl SignedQuery {
    /// Returns the query string to transmit: the canonical query with the
    /// encoded signature appended last.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!(
            "{}&{}={}",
            self.canonical_query,
            SIGNATURE_PARAM,
            urlencoding::encode(&self.signature)
        )
    }
}

/// Formats a timestamp the way the service expects it.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the canonical query string for a parameter set.
///
/// Keys are sorted by byte value (`BTreeMap` order). Keys and values are
/// percent-encoded per RFC 3986: only `A-Za-z0-9-_.~` are left as-is and
/// a space becomes `%20`, never `+`.
#[must_use]
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a canonical query back into its `(key, value)` pairs, in order.
///
/// # Errors
///
/// Returns an error if a decoded component is not valid UTF-8.
pub fn parse_canonical_query(query: &str) -> Result<Vec<(String, String)>, FromUtf8Error> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((
                urlencoding::decode(key)?.into_owned(),
                urlencoding::decode(value)?.into_owned(),
            ))
        })
        .collect()
}

/// Builds the newline-joined string that gets signed.
///
/// The host is lower-cased; everything else is used verbatim.
#[must_use]
pub fn string_to_sign(method: &str, host: &str, path: &str, canonical_query: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.to_uppercase(),
        host.to_lowercase(),
        path,
        canonical_query
    )
}

/// Computes a base64-encoded HMAC-SHA256 of `message` keyed by `secret`.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &SecretKey) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_ref().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Signs a parameter set at the given instant.
///
/// `Timestamp` and `AWSAccessKeyId` are inserted, overwriting any value the
/// caller supplied. The function is pure: the same inputs always produce the
/// same [`SignedQuery`].
#[must_use]
pub fn sign(
    method: &str,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
    credentials: &Credentials,
    timestamp: DateTime<Utc>,
) -> SignedQuery {
    let mut params = params.clone();
    params.insert(TIMESTAMP_PARAM.to_string(), format_timestamp(timestamp));
    params.insert(
        ACCESS_KEY_PARAM.to_string(),
        credentials.access_key().as_ref().to_string(),
    );
    params.remove(SIGNATURE_PARAM);

    let canonical_query = canonical_query(&params);
    let signature = compute_signature(
        &string_to_sign(method, host, path, &canonical_query),
        credentials.secret_key(),
    );

    SignedQuery {
        canonical_query,
        signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credentials() -> Credentials {
        Credentials::from_keys("AKID", "secret").unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2009, 1, 1, 12, 0, 0).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key") = 6e9ef29b...58ed4a
        let secret = SecretKey::new("key").unwrap();
        assert_eq!(
            compute_signature("message", &secret),
            "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo="
        );
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(format_timestamp(timestamp()), "2009-01-01T12:00:00Z");
    }

    #[test]
    fn test_canonical_query_sorts_by_byte_value() {
        let query = canonical_query(&params(&[("b", "2"), ("B", "1"), ("a", "3")]));
        // Uppercase sorts before lowercase.
        assert_eq!(query, "B=1&a=3&b=2");
    }

    #[test]
    fn test_canonical_query_encodes_reserved_characters() {
        let query = canonical_query(&params(&[
            ("ResponseGroup", "ItemAttributes,Offers"),
            ("Keywords", "harry potter"),
            ("Title", "a~b-c_d.e"),
            ("Author", "F\u{e9}lix"),
        ]));
        assert_eq!(
            query,
            "Author=F%C3%A9lix&Keywords=harry%20potter&ResponseGroup=ItemAttributes%2COffers&Title=a~b-c_d.e"
        );
    }

    #[test]
    fn test_parse_canonical_query_round_trips() {
        let original = params(&[("Keywords", "harry potter & friends"), ("Author", "F\u{e9}lix")]);
        let decoded = parse_canonical_query(&canonical_query(&original)).unwrap();
        let expected: Vec<(String, String)> = original.into_iter().collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_string_to_sign_lowercases_host() {
        assert_eq!(
            string_to_sign("get", "ECS.AmazonAWS.com", "/onca/xml", "A=1"),
            "GET\necs.amazonaws.com\n/onca/xml\nA=1"
        );
    }

    #[test]
    fn test_sign_inserts_timestamp_and_access_key() {
        let signed = sign(
            "GET",
            "ecs.amazonaws.com",
            "/onca/xml",
            &params(&[("Operation", "ItemLookup"), ("AWSAccessKeyId", "spoofed")]),
            &credentials(),
            timestamp(),
        );
        assert_eq!(
            signed.canonical_query,
            "AWSAccessKeyId=AKID&Operation=ItemLookup&Timestamp=2009-01-01T12%3A00%3A00Z"
        );
    }

    #[test]
    fn test_sign_matches_manual_computation() {
        let signed = sign(
            "GET",
            "ecs.amazonaws.com",
            "/onca/xml",
            &params(&[("Operation", "ItemLookup")]),
            &credentials(),
            timestamp(),
        );
        let expected = compute_signature(
            &format!("GET\necs.amazonaws.com\n/onca/xml\n{}", signed.canonical_query),
            credentials().secret_key(),
        );
        assert_eq!(signed.signature, expected);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let p = params(&[("Operation", "ItemSearch"), ("Keywords", "rust")]);
        let first = sign("GET", "ecs.amazonaws.com", "/onca/xml", &p, &credentials(), timestamp());
        let second = sign("GET", "ecs.amazonaws.com", "/onca/xml", &p, &credentials(), timestamp());
        assert_eq!(first, second);
    }

    #[test]
    fn test_sign_is_sensitive_to_every_input() {
        let p = params(&[("Operation", "ItemSearch"), ("Keywords", "rust")]);
        let base = sign("GET", "ecs.amazonaws.com", "/onca/xml", &p, &credentials(), timestamp());

        let changed_value = params(&[("Operation", "ItemSearch"), ("Keywords", "rusty")]);
        let other = sign("GET", "ecs.amazonaws.com", "/onca/xml", &changed_value, &credentials(), timestamp());
        assert_ne!(base.signature, other.signature);

        let other = sign("GET", "ecs.amazonaws.de", "/onca/xml", &p, &credentials(), timestamp());
        assert_ne!(base.signature, other.signature);

        let other_key = Credentials::from_keys("AKID", "other-secret").unwrap();
        let other = sign("GET", "ecs.amazonaws.com", "/onca/xml", &p, &other_key, timestamp());
        assert_ne!(base.signature, other.signature);
        assert_eq!(base.canonical_query, other.canonical_query);
    }

    #[test]
    fn test_query_string_appends_encoded_signature() {
        let signed = SignedQuery {
            canonical_query: "A=1".to_string(),
            signature: "ab+c/d=".to_string(),
        };
        assert_eq!(signed.to_query_string(), "A=1&Signature=ab%2Bc%2Fd%3D");
    }
}

//! Operation requests and their signed URLs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::auth::signing::{self, ACCESS_KEY_PARAM, SIGNATURE_PARAM, TIMESTAMP_PARAM};
use crate::auth::Credentials;
use crate::config::{ApiVersion, AssociateTag, Endpoint};
use crate::operations::Operation;

/// Parameters the builder owns. Caller values for these are dropped.
pub const RESERVED_PARAMS: [&str; 7] = [
    "Service",
    "Operation",
    "Version",
    "ContentType",
    ACCESS_KEY_PARAM,
    TIMESTAMP_PARAM,
    SIGNATURE_PARAM,
];

const SERVICE_NAME: &str = "AWSECommerceService";
const CONTENT_TYPE: &str = "text/xml";
const ASSOCIATE_TAG_PARAM: &str = "AssociateTag";

/// An operation with its caller-supplied parameters.
///
/// Parameter keys are case-sensitive and kept in byte order.
///
/// # Example
///
/// ```rust
/// use amazon_product::operations::{Operation, OperationRequest};
///
/// let request = OperationRequest::new(Operation::ItemSearch)
///     .param("SearchIndex", "Books")
///     .param("ItemPage", 2);
///
/// assert_eq!(request.get("ItemPage"), Some("2"));
/// assert_eq!(request.missing_param(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationRequest {
    operation: Operation,
    params: BTreeMap<String, String>,
}

impl OperationRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: BTreeMap::new(),
        }
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Sets several parameters.
    #[must_use]
    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in params {
            self.params.insert(key.into(), value.to_string());
        }
        self
    }

    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns all parameters.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Returns the first required parameter that is absent or blank.
    #[must_use]
    pub fn missing_param(&self) -> Option<&'static str> {
        self.operation
            .required_params()
            .iter()
            .copied()
            .find(|key| self.get(key).map_or(true, |v| v.trim().is_empty()))
    }
}

/// A fully signed request, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    /// Complete URL with the signature as the last query parameter.
    pub url: String,
    /// The canonical query that was signed.
    pub canonical_query: String,
    /// Base64 signature (not percent-encoded).
    pub signature: String,
}

/// Merges the fixed parameters into a request and signs it.
///
/// `Service`, `Operation`, `Version` and `ContentType` are always set by the
/// builder; `AWSAccessKeyId` and `Timestamp` by the signer. The configured
/// associate tag is a default that an explicit `AssociateTag` parameter
/// overrides.
#[must_use]
pub fn build_request(
    request: &OperationRequest,
    endpoint: &Endpoint,
    version: &ApiVersion,
    credentials: &Credentials,
    associate_tag: Option<&AssociateTag>,
    timestamp: DateTime<Utc>,
) -> SignedRequest {
    let mut params = BTreeMap::new();
    if let Some(tag) = associate_tag {
        params.insert(ASSOCIATE_TAG_PARAM.to_string(), tag.as_ref().to_string());
    }

    for (key, value) in &request.params {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            tracing::debug!(
                operation = %request.operation,
                param = %key,
                "Ignoring caller value for reserved parameter"
            );
            continue;
        }
        params.insert(key.clone(), value.clone());
    }

    params.insert("Service".to_string(), SERVICE_NAME.to_string());
    params.insert("Operation".to_string(), request.operation.name().to_string());
    params.insert("Version".to_string(), version.as_str().to_string());
    params.insert("ContentType".to_string(), CONTENT_TYPE.to_string());

    let signed = signing::sign(
        "GET",
        endpoint.host(),
        endpoint.path(),
        &params,
        credentials,
        timestamp,
    );

    SignedRequest {
        url: format!("{}?{}", endpoint.base_url(), signed.to_query_string()),
        canonical_query: signed.canonical_query,
        signature: signed.signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signing::parse_canonical_query;
    use crate::config::Locale;
    use chrono::TimeZone;

    fn credentials() -> Credentials {
        Credentials::from_keys("AKID", "secret").unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 8, 1, 0, 0, 0).unwrap()
    }

    fn build(request: &OperationRequest, tag: Option<&AssociateTag>) -> SignedRequest {
        build_request(
            request,
            &Locale::Us.endpoint(),
            &ApiVersion::V2011_08_01,
            &credentials(),
            tag,
            timestamp(),
        )
    }

    fn param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_fixed_parameters_are_added() {
        let request = OperationRequest::new(Operation::ItemLookup).param("ItemId", "0747532745");
        let signed = build(&request, None);
        let pairs = parse_canonical_query(&signed.canonical_query).unwrap();

        assert_eq!(param(&pairs, "Service"), Some("AWSECommerceService"));
        assert_eq!(param(&pairs, "Operation"), Some("ItemLookup"));
        assert_eq!(param(&pairs, "Version"), Some("2011-08-01"));
        assert_eq!(param(&pairs, "ContentType"), Some("text/xml"));
        assert_eq!(param(&pairs, "AWSAccessKeyId"), Some("AKID"));
        assert_eq!(param(&pairs, "Timestamp"), Some("2011-08-01T00:00:00Z"));
        assert_eq!(param(&pairs, "ItemId"), Some("0747532745"));
        assert_eq!(param(&pairs, "Signature"), None);
    }

    #[test]
    fn test_reserved_parameters_cannot_be_overridden() {
        let request = OperationRequest::new(Operation::ItemLookup)
            .param("Operation", "ItemSearch")
            .param("Version", "2000-01-01")
            .param("Service", "Other")
            .param("Signature", "forged");
        let pairs = parse_canonical_query(&build(&request, None).canonical_query).unwrap();

        assert_eq!(param(&pairs, "Operation"), Some("ItemLookup"));
        assert_eq!(param(&pairs, "Version"), Some("2011-08-01"));
        assert_eq!(param(&pairs, "Service"), Some("AWSECommerceService"));
        assert_eq!(param(&pairs, "Signature"), None);
    }

    #[test]
    fn test_associate_tag_is_a_default() {
        let tag = AssociateTag::new("config-20").unwrap();

        let request = OperationRequest::new(Operation::CartCreate);
        let pairs = parse_canonical_query(&build(&request, Some(&tag)).canonical_query).unwrap();
        assert_eq!(param(&pairs, "AssociateTag"), Some("config-20"));

        let request = request.param("AssociateTag", "caller-21");
        let pairs = parse_canonical_query(&build(&request, Some(&tag)).canonical_query).unwrap();
        assert_eq!(param(&pairs, "AssociateTag"), Some("caller-21"));
    }

    #[test]
    fn test_url_ends_with_encoded_signature() {
        let request = OperationRequest::new(Operation::ItemLookup).param("ItemId", "B000");
        let signed = build(&request, None);

        assert!(signed
            .url
            .starts_with("https://ecs.amazonaws.com/onca/xml?AWSAccessKeyId=AKID&"));
        assert!(signed.url.ends_with(&format!(
            "&Signature={}",
            urlencoding::encode(&signed.signature)
        )));
    }

    #[test]
    fn test_missing_param_reports_first_absent_or_blank() {
        let request = OperationRequest::new(Operation::CartGet).param("CartId", "123");
        assert_eq!(request.missing_param(), Some("HMAC"));

        let request = request.param("HMAC", "  ");
        assert_eq!(request.missing_param(), Some("HMAC"));

        let request = request.param("HMAC", "abc");
        assert_eq!(request.missing_param(), None);
    }

    #[test]
    fn test_params_accepts_pairs() {
        let request = OperationRequest::new(Operation::ItemSearch)
            .params([("SearchIndex", "Books"), ("Keywords", "rust")]);
        assert_eq!(request.parameters().len(), 2);
        assert_eq!(request.get("Keywords"), Some("rust"));
    }
}

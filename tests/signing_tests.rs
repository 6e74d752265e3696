//! Integration tests for the signed requests that reach the wire.
//!
//! A mock server records what the client sends; the tests then re-derive
//! the signature from the recorded query and compare.

mod common;

use std::collections::BTreeMap;

use amazon_product::auth::signing::{canonical_query, compute_signature, string_to_sign};
use amazon_product::{Operation, OperationRequest, SecretKey};
use chrono::NaiveDateTime;
use common::{api_for, response, ACCESS_KEY, ASSOCIATE_TAG, SECRET_KEY};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn recorded(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

fn query_map(request: &Request) -> BTreeMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/onca/xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(response("ItemLookup", "<Items><Item><ASIN>B000</ASIN></Item></Items>")),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sent_request_carries_fixed_parameters() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let api = api_for(&server);

    api.item_lookup("0747532745", &[("ResponseGroup", "Small")])
        .await
        .unwrap();

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 1);
    let query = query_map(&requests[0]);

    assert_eq!(query["Service"], "AWSECommerceService");
    assert_eq!(query["Operation"], "ItemLookup");
    assert_eq!(query["Version"], "2011-08-01");
    assert_eq!(query["ContentType"], "text/xml");
    assert_eq!(query["AWSAccessKeyId"], ACCESS_KEY);
    assert_eq!(query["AssociateTag"], ASSOCIATE_TAG);
    assert_eq!(query["ItemId"], "0747532745");
    assert_eq!(query["ResponseGroup"], "Small");
    assert!(NaiveDateTime::parse_from_str(&query["Timestamp"], "%Y-%m-%dT%H:%M:%SZ").is_ok());
}

#[tokio::test]
async fn test_sent_signature_verifies() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let api = api_for(&server);

    api.item_lookup("0747532745", &[("ResponseGroup", "Images,Small")])
        .await
        .unwrap();

    let requests = recorded(&server).await;
    let mut query = query_map(&requests[0]);
    let signature = query.remove("Signature").unwrap();

    let host = api.config().endpoint().host().to_string();
    let expected = compute_signature(
        &string_to_sign("GET", &host, "/onca/xml", &canonical_query(&query)),
        &SecretKey::new(SECRET_KEY).unwrap(),
    );
    assert_eq!(signature, expected);
}

#[tokio::test]
async fn test_signature_is_last_and_query_is_sorted() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let api = api_for(&server);

    api.item_lookup("B000", &[("zeta", "1"), ("Alpha", "2")])
        .await
        .unwrap();

    let requests = recorded(&server).await;
    let raw = requests[0].url.query().unwrap().to_string();
    let keys: Vec<&str> = raw
        .split('&')
        .map(|pair| pair.split('=').next().unwrap_or_default())
        .collect();

    assert_eq!(keys.last(), Some(&"Signature"));
    let unsigned = &keys[..keys.len() - 1];
    let mut sorted = unsigned.to_vec();
    sorted.sort_unstable();
    assert_eq!(unsigned, sorted.as_slice());
}

#[tokio::test]
async fn test_caller_cannot_override_reserved_parameters() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let api = api_for(&server);

    let request = OperationRequest::new(Operation::ItemLookup)
        .param("ItemId", "B000")
        .param("Service", "Other")
        .param("Operation", "CartClear")
        .param("Signature", "forged");
    api.call(request).await.unwrap();

    let requests = recorded(&server).await;
    let query = query_map(&requests[0]);
    assert_eq!(query["Service"], "AWSECommerceService");
    assert_eq!(query["Operation"], "ItemLookup");
    assert_ne!(query["Signature"], "forged");
}

#[tokio::test]
async fn test_caller_associate_tag_wins_over_default() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let api = api_for(&server);

    api.item_lookup("B000", &[("AssociateTag", "other-21")])
        .await
        .unwrap();

    let requests = recorded(&server).await;
    assert_eq!(query_map(&requests[0])["AssociateTag"], "other-21");
}

#[test]
fn test_signing_is_deterministic_for_fixed_time() {
    use amazon_product::auth::signing::sign;
    use amazon_product::Credentials;
    use chrono::{TimeZone, Utc};

    let credentials = Credentials::from_keys(ACCESS_KEY, SECRET_KEY).unwrap();
    let mut params = BTreeMap::new();
    params.insert("Operation".to_string(), "ItemLookup".to_string());
    params.insert("ItemId".to_string(), "0679722769".to_string());
    let at = Utc.with_ymd_and_hms(2009, 1, 1, 12, 0, 0).unwrap();

    let first = sign("GET", "ECS.amazonaws.com", "/onca/xml", &params, &credentials, at);
    let second = sign("get", "ecs.amazonaws.com", "/onca/xml", &params, &credentials, at);
    assert_eq!(first, second);
    assert!(first.canonical_query.contains("Timestamp=2009-01-01T12%3A00%3A00Z"));
}

//! The high-level Product Advertising API client.
//!
//! [`ProductApi`] ties the pieces together: it checks a request against the
//! operation registry, signs it, sends it and processes the response with
//! the operation's error tolerance.
//!
//! # Example
//!
//! ```rust,ignore
//! use amazon_product::{ProductApi, ProductApiConfig, AccessKey, SecretKey, AssociateTag};
//!
//! let config = ProductApiConfig::builder()
//!     .access_key(AccessKey::new("AKID")?)
//!     .secret_key(SecretKey::new("secret")?)
//!     .associate_tag(AssociateTag::new("mytag-20")?)
//!     .build()?;
//! let api = ProductApi::new(config)?;
//!
//! let envelope = api.item_lookup("0747532745", &[("ResponseGroup", "Small")]).await?;
//! for title in envelope.find("//Items/Item/ItemAttributes/Title")? {
//!     println!("{}", title.text());
//! }
//!
//! let mut pages = api.item_search("Books", &[("Keywords", "rust")], Some(3));
//! while let Some(page) = pages.next().await? {
//!     println!("page {} of {}", pages.current(), pages.pages());
//! }
//! ```

pub mod cart;
mod errors;

pub use cart::{Cart, CartItem, CartItemsError};
pub use errors::ApiError;

use chrono::Utc;

use crate::api::cart::{encode_items, ItemIdKind};
use crate::clients::HttpClient;
use crate::config::ProductApiConfig;
use crate::operations::{build_request, Operation, OperationRequest, SignedRequest};
use crate::pagination::{item_search_cap, PageFuture, PageSpec, Paginator};
use crate::response::{process_http_response, Envelope};

/// Client for the Product Advertising API.
///
/// # Thread Safety
///
/// `ProductApi` is `Send + Sync`; share one instance across tasks. Every
/// call signs with the current time and is independent of all others.
#[derive(Debug)]
pub struct ProductApi {
    config: ProductApiConfig,
    http: HttpClient,
}

// Verify ProductApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProductApi>();
};

impl ProductApi {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the transport cannot be created.
    pub fn new(config: ProductApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?;
        Ok(Self { config, http })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ProductApiConfig {
        &self.config
    }

    /// Checks a request against the registry and signs it with the current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DeprecatedOperation`] for retired operations and
    /// [`ApiError::MissingParameter`] if a required parameter is absent.
    pub fn sign(&self, request: &OperationRequest) -> Result<SignedRequest, ApiError> {
        let operation = request.operation();
        if operation.is_deprecated() {
            return Err(ApiError::DeprecatedOperation { operation });
        }
        if let Some(param) = request.missing_param() {
            return Err(ApiError::MissingParameter { operation, param });
        }

        Ok(build_request(
            request,
            self.config.endpoint(),
            self.config.api_version(),
            self.config.credentials(),
            self.config.associate_tag(),
            Utc::now(),
        ))
    }

    /// Sends a request and returns its envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for client-side rejections, transport failures,
    /// unparseable bodies and fatal service errors.
    pub async fn call(&self, request: OperationRequest) -> Result<Envelope, ApiError> {
        let signed = self.sign(&request)?;
        let operation = request.operation();

        tracing::debug!(
            operation = %operation,
            host = %self.config.endpoint().host(),
            "Sending request"
        );
        let response = self.http.get(&signed.url).await?;
        process_http_response(operation, &response)
    }

    /// Sends a request to an operation given by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownOperation`] for names not in the registry,
    /// otherwise as [`ProductApi::call`].
    pub async fn call_named(
        &self,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let operation: Operation = operation.parse()?;
        self.call(OperationRequest::new(operation).params(params.iter().copied()))
            .await
    }

    /// Walks the pages of a request, setting `spec`'s counter on each one.
    #[must_use]
    pub fn paginate<'a>(&'a self, request: OperationRequest, spec: PageSpec) -> Paginator<'a> {
        let counter = spec.counter().to_string();
        Paginator::new(spec, move |page: u32| -> PageFuture<'a> {
            let request = request.clone().param(counter.clone(), page);
            Box::pin(self.call(request))
        })
    }

    /// Looks up items by id (comma-separated for several).
    ///
    /// An invalid id among several valid ones does not fail the call; the
    /// error stays readable on the envelope.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn item_lookup(
        &self,
        item_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let request = OperationRequest::new(Operation::ItemLookup)
            .params(params.iter().copied())
            .param("ItemId", item_id);
        self.call(request).await
    }

    /// Searches `search_index`, page by page.
    ///
    /// At most `limit` pages are fetched, and never more than the service
    /// serves for the index (5 for `All`, 400 otherwise).
    #[must_use]
    pub fn item_search<'a>(
        &'a self,
        search_index: &str,
        params: &[(&str, &str)],
        limit: Option<u32>,
    ) -> Paginator<'a> {
        let request = OperationRequest::new(Operation::ItemSearch)
            .params(params.iter().copied())
            .param("SearchIndex", search_index);
        self.paginate(request, PageSpec::item_search())
            .limit(limit)
            .hard_cap(Some(item_search_cap(search_index)))
    }

    /// Walks the customer review pages of one item.
    ///
    /// `ResponseGroup` defaults to `Reviews`.
    #[must_use]
    pub fn review_pages<'a>(
        &'a self,
        item_id: &str,
        params: &[(&str, &str)],
        limit: Option<u32>,
    ) -> Paginator<'a> {
        let request = OperationRequest::new(Operation::ItemLookup)
            .param("ResponseGroup", "Reviews")
            .params(params.iter().copied())
            .param("ItemId", item_id);
        self.paginate(request, PageSpec::reviews()).limit(limit)
    }

    /// Finds items similar to all of `item_ids`.
    ///
    /// Ids without similar items are tolerated as long as some similar
    /// items are found.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn similarity_lookup(
        &self,
        item_ids: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let request = OperationRequest::new(Operation::SimilarityLookup)
            .params(params.iter().copied())
            .param("ItemId", item_ids.join(","));
        self.call(request).await
    }

    /// Looks up a browse node with its children and ancestors.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn browse_node_lookup(
        &self,
        node_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let request = OperationRequest::new(Operation::BrowseNodeLookup)
            .params(params.iter().copied())
            .param("BrowseNodeId", node_id);
        self.call(request).await
    }

    /// Looks up a third-party seller.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn seller_lookup(
        &self,
        seller_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let request = OperationRequest::new(Operation::SellerLookup)
            .params(params.iter().copied())
            .param("SellerId", seller_id);
        self.call(request).await
    }

    /// Creates a cart holding `items` (`(ASIN, quantity)` pairs).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cart`] if the items fail validation, otherwise as
    /// [`ProductApi::call`].
    pub async fn cart_create(
        &self,
        items: &[(&str, u32)],
        params: &[(&str, &str)],
    ) -> Result<Cart, ApiError> {
        let item_params = encode_items(items, ItemIdKind::Asin)?;
        let request = OperationRequest::new(Operation::CartCreate)
            .params(params.iter().copied())
            .params(item_params);
        self.cart_call(request).await
    }

    /// Adds `items` (`(ASIN, quantity)` pairs) to a cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cart`] if the items fail validation, otherwise as
    /// [`ProductApi::call`].
    pub async fn cart_add(
        &self,
        cart_id: &str,
        hmac: &str,
        items: &[(&str, u32)],
    ) -> Result<Cart, ApiError> {
        let item_params = encode_items(items, ItemIdKind::Asin)?;
        self.cart_call(Self::cart_request(Operation::CartAdd, cart_id, hmac).params(item_params))
            .await
    }

    /// Sets quantities of cart lines (`(CartItemId, quantity)` pairs).
    /// Quantity 0 removes a line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cart`] if the items fail validation, otherwise as
    /// [`ProductApi::call`].
    pub async fn cart_modify(
        &self,
        cart_id: &str,
        hmac: &str,
        items: &[(&str, u32)],
    ) -> Result<Cart, ApiError> {
        let item_params = encode_items(items, ItemIdKind::CartItemId)?;
        self.cart_call(
            Self::cart_request(Operation::CartModify, cart_id, hmac).params(item_params),
        )
        .await
    }

    /// Fetches a cart.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn cart_get(&self, cart_id: &str, hmac: &str) -> Result<Cart, ApiError> {
        self.cart_call(Self::cart_request(Operation::CartGet, cart_id, hmac))
            .await
    }

    /// Removes every line from a cart.
    ///
    /// # Errors
    ///
    /// See [`ProductApi::call`].
    pub async fn cart_clear(&self, cart_id: &str, hmac: &str) -> Result<Cart, ApiError> {
        self.cart_call(Self::cart_request(Operation::CartClear, cart_id, hmac))
            .await
    }

    fn cart_request(operation: Operation, cart_id: &str, hmac: &str) -> OperationRequest {
        OperationRequest::new(operation)
            .param("CartId", cart_id)
            .param("HMAC", hmac)
    }

    async fn cart_call(&self, request: OperationRequest) -> Result<Cart, ApiError> {
        let envelope = self.call(request).await?;
        Cart::from_envelope(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signing::parse_canonical_query;
    use crate::config::{AccessKey, SecretKey};

    fn api() -> ProductApi {
        let config = ProductApiConfig::builder()
            .access_key(AccessKey::new("AKID").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        ProductApi::new(config).unwrap()
    }

    #[test]
    fn test_sign_rejects_deprecated_operations() {
        let err = api()
            .sign(&OperationRequest::new(Operation::Help))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::DeprecatedOperation {
                operation: Operation::Help
            }
        ));
    }

    #[test]
    fn test_sign_rejects_missing_parameters() {
        let err = api()
            .sign(&OperationRequest::new(Operation::BrowseNodeLookup))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingParameter {
                param: "BrowseNodeId",
                ..
            }
        ));
    }

    #[test]
    fn test_sign_targets_configured_endpoint() {
        let signed = api()
            .sign(&OperationRequest::new(Operation::ItemLookup).param("ItemId", "B000"))
            .unwrap();
        assert!(signed.url.starts_with("https://ecs.amazonaws.com/onca/xml?"));
        let pairs = parse_canonical_query(&signed.canonical_query).unwrap();
        assert!(pairs.contains(&("Version".to_string(), "2011-08-01".to_string())));
    }

    #[test]
    fn test_cart_request_carries_credentials() {
        let request = ProductApi::cart_request(Operation::CartGet, "123", "h+m");
        assert_eq!(request.get("CartId"), Some("123"));
        assert_eq!(request.get("HMAC"), Some("h+m"));
        assert_eq!(request.missing_param(), None);
    }

    #[test]
    fn test_call_named_rejects_unknown_operation() {
        let err = tokio_test::block_on(api().call_named("NoSuchOperation", &[])).unwrap_err();
        assert!(matches!(err, ApiError::UnknownOperation(_)));
    }

    #[test]
    fn test_cart_validation_happens_before_sending() {
        let api = api();
        let err = tokio_test::block_on(api.cart_create(&[], &[])).unwrap_err();
        assert!(matches!(err, ApiError::Cart(CartItemsError::Empty)));

        let err = tokio_test::block_on(api.cart_add("1", "h", &[("A1", 1000)])).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Cart(CartItemsError::QuantityOutOfRange { .. })
        ));
    }
}

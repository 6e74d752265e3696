//! # Amazon Product Advertising API
//!
//! A Rust client for the Amazon Product Advertising API, providing signed
//! requests, typed error classification and demand-driven pagination over
//! the XML responses of the service.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ProductApiConfig`] and [`ProductApiConfigBuilder`]
//! - Validated newtypes for credentials, associate tags and endpoints
//! - HMAC-SHA256 request signing via [`auth::signing`]
//! - An operation registry with required parameters and retired operations
//! - XML envelopes navigable by path expressions via [`Envelope`]
//! - Service errors classified into [`AwsErrorKind`]
//! - Page-by-page iteration over searches and reviews via [`Paginator`]
//! - Remote shopping carts via [`Cart`]
//!
//! ## Quick Start
//!
//! ```rust
//! use amazon_product::{ProductApiConfig, AccessKey, SecretKey, AssociateTag, Locale, ApiVersion};
//!
//! let config = ProductApiConfig::builder()
//!     .access_key(AccessKey::new("your-access-key").unwrap())
//!     .secret_key(SecretKey::new("your-secret-key").unwrap())
//!     .associate_tag(AssociateTag::new("yourtag-20").unwrap())
//!     .locale(Locale::Uk)
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().host(), "ecs.amazonaws.co.uk");
//! ```
//!
//! ## Looking Up Items
//!
//! ```rust,ignore
//! use amazon_product::{ProductApi, AwsErrorKind};
//!
//! let api = ProductApi::new(config)?;
//!
//! let envelope = api
//!     .item_lookup("9780747532743", &[("IdType", "ISBN"), ("SearchIndex", "Books")])
//!     .await?;
//! for title in envelope.find("//Items/Item/ItemAttributes/Title")? {
//!     println!("{}", title.text());
//! }
//! ```
//!
//! ## Searching
//!
//! Searches are paginated. Nothing is fetched until [`Paginator::next`] is
//! awaited, and never more pages than asked for:
//!
//! ```rust,ignore
//! let mut pages = api.item_search("Books", &[("Keywords", "Harry Potter")], Some(2));
//! while let Some(envelope) = pages.next().await? {
//!     println!("page {} of {} ({} results)", pages.current(), pages.pages(), pages.results());
//! }
//! ```
//!
//! ## Carts
//!
//! ```rust,ignore
//! let cart = api.cart_create(&[("0747532745", 1)], &[]).await?;
//! let cart = api.cart_add(&cart.cart_id, &cart.hmac, &[("0747538492", 2)]).await?;
//! assert_eq!(cart.len(), 3);
//! api.cart_clear(&cart.cart_id, &cart.hmac).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction; requests are
//!   checked against the operation registry before anything is sent
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Every failure is reported to the caller as it happens

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod operations;
pub mod pagination;
pub mod response;
pub mod xml;

// Re-export public types at crate root for convenience
pub use api::{ApiError, Cart, CartItem, CartItemsError, ProductApi};
pub use auth::Credentials;
pub use config::{
    AccessKey, ApiVersion, AssociateTag, Endpoint, Locale, ProductApiConfig,
    ProductApiConfigBuilder, SecretKey,
};
pub use error::ConfigError;

// Re-export request and response types
pub use operations::{Operation, OperationRequest, SignedRequest};
pub use pagination::{PageSpec, Paginator};
pub use response::{AwsError, AwsErrorKind, Envelope};
pub use xml::{XPath, XmlError};

// Re-export HTTP client types
pub use clients::{HttpClient, HttpError, HttpResponse, HttpResponseError};

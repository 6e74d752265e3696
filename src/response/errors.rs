//! Classification of vendor error codes.
//!
//! The service reports failures as `<Error><Code/><Message/></Error>`
//! entries inside an otherwise normal envelope. [`classify`] maps each code
//! onto a closed set of [`AwsErrorKind`]s through a static table; codes the
//! table does not know become [`AwsErrorKind::Generic`] with the raw code
//! and message kept, so nothing is ever mapped by guesswork.

use std::fmt;

use thiserror::Error;

use crate::operations::Operation;

/// What kind of failure a vendor error code denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AwsErrorKind {
    /// A parameter value was rejected.
    InvalidParameterValue,
    /// The `SearchIndex` value is not a valid index.
    InvalidSearchIndex,
    /// The `ListType` value is not a valid list type.
    InvalidListType,
    /// A response group is unknown or not valid for the operation.
    InvalidResponseGroup,
    /// The parameters cannot be combined.
    InvalidParameterCombination,
    /// No similar items exist for the given item.
    NoSimilarityForAsin,
    /// The search matched nothing.
    NoExactMatchesFound,
    /// A required parameter or parameter combination is missing.
    NotEnoughParameters,
    /// The cart id and HMAC do not belong together.
    CartInfoMismatch,
    /// The item is already in the cart.
    ItemAlreadyInCart,
    /// The item cannot be placed in, or is not in, the cart.
    InvalidCartItem,
    /// A numeric parameter is out of range.
    ParameterOutOfRange,
    /// The access key id is not recognized.
    InvalidClientTokenId,
    /// The signature does not match the request.
    SignatureDoesNotMatch,
    /// The account is sending requests too fast.
    TooManyRequests,
    /// The service failed internally.
    InternalError,
    /// Any code not listed above.
    Generic,
}

impl AwsErrorKind {
    /// Returns the kind's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InvalidSearchIndex => "InvalidSearchIndex",
            Self::InvalidListType => "InvalidListType",
            Self::InvalidResponseGroup => "InvalidResponseGroup",
            Self::InvalidParameterCombination => "InvalidParameterCombination",
            Self::NoSimilarityForAsin => "NoSimilarityForAsin",
            Self::NoExactMatchesFound => "NoExactMatchesFound",
            Self::NotEnoughParameters => "NotEnoughParameters",
            Self::CartInfoMismatch => "CartInfoMismatch",
            Self::ItemAlreadyInCart => "ItemAlreadyInCart",
            Self::InvalidCartItem => "InvalidCartItem",
            Self::ParameterOutOfRange => "ParameterOutOfRange",
            Self::InvalidClientTokenId => "InvalidClientTokenId",
            Self::SignatureDoesNotMatch => "SignatureDoesNotMatch",
            Self::TooManyRequests => "TooManyRequests",
            Self::InternalError => "InternalError",
            Self::Generic => "AwsError",
        }
    }
}

impl fmt::Display for AwsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified vendor error.
///
/// The code and message are kept verbatim, so callers can match on either
/// the kind or the raw code.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind} ({code}): {message}")]
pub struct AwsError {
    /// The classified kind.
    pub kind: AwsErrorKind,
    /// The vendor error code.
    pub code: String,
    /// The vendor message.
    pub message: String,
}

const ENUMERATED_PARAMETER: &str = "AWS.InvalidEnumeratedParameter";
const INVALID_PARAMETER_VALUE: &str = "AWS.InvalidParameterValue";

/// Vendor code to kind. Codes not listed here are [`AwsErrorKind::Generic`].
pub const ERROR_CODES: &[(&str, AwsErrorKind)] = &[
    (INVALID_PARAMETER_VALUE, AwsErrorKind::InvalidParameterValue),
    (ENUMERATED_PARAMETER, AwsErrorKind::InvalidParameterValue),
    ("AWS.InvalidResponseGroup", AwsErrorKind::InvalidResponseGroup),
    ("AWS.InvalidParameterCombination", AwsErrorKind::InvalidParameterCombination),
    ("AWS.RestrictedParameterValueCombination", AwsErrorKind::InvalidParameterCombination),
    ("AWS.ECommerceService.NoSimilarities", AwsErrorKind::NoSimilarityForAsin),
    ("AWS.ECommerceService.NoExactMatches", AwsErrorKind::NoExactMatchesFound),
    ("AWS.MinimumParameterRequirement", AwsErrorKind::NotEnoughParameters),
    ("AWS.MissingParameterValueCombination", AwsErrorKind::NotEnoughParameters),
    ("AWS.MissingParameters", AwsErrorKind::NotEnoughParameters),
    ("AWS.ECommerceService.CartInfoMismatch", AwsErrorKind::CartInfoMismatch),
    ("AWS.ECommerceService.ItemAlreadyInCart", AwsErrorKind::ItemAlreadyInCart),
    ("AWS.ECommerceService.ItemNotEligibleForCart", AwsErrorKind::InvalidCartItem),
    ("AWS.ECommerceService.InvalidCartItemId", AwsErrorKind::InvalidCartItem),
    ("AWS.ParameterOutOfRange", AwsErrorKind::ParameterOutOfRange),
    ("AWS.InvalidClientTokenId", AwsErrorKind::InvalidClientTokenId),
    ("AWS.InvalidAccount", AwsErrorKind::InvalidClientTokenId),
    ("SignatureDoesNotMatch", AwsErrorKind::SignatureDoesNotMatch),
    ("AWS.RequestThrottled", AwsErrorKind::TooManyRequests),
    ("RequestThrottled", AwsErrorKind::TooManyRequests),
    ("AWS.InternalError", AwsErrorKind::InternalError),
    ("InternalError", AwsErrorKind::InternalError),
];

// Parameters whose invalid values identify a cart item.
const CART_ITEM_PARAMS: [&str; 3] = ["ASIN", "CartItemId", "OfferListingId"];

/// Classifies a vendor error.
///
/// `operation` refines two codes: `AWS.InvalidEnumeratedParameter` is split
/// by the parameter its message names, and `AWS.InvalidParameterValue` for
/// an item id in a cart operation becomes [`AwsErrorKind::InvalidCartItem`].
///
/// # Example
///
/// ```rust
/// use amazon_product::response::{classify, AwsErrorKind};
///
/// let error = classify(
///     None,
///     "AWS.InvalidEnumeratedParameter",
///     "The value you specified for SearchIndex is invalid.",
/// );
/// assert_eq!(error.kind, AwsErrorKind::InvalidSearchIndex);
///
/// let error = classify(None, "AWS.SomethingNew", "details");
/// assert_eq!(error.kind, AwsErrorKind::Generic);
/// assert_eq!(error.code, "AWS.SomethingNew");
/// ```
#[must_use]
pub fn classify(operation: Option<Operation>, code: &str, message: &str) -> AwsError {
    let code = code.trim();
    let kind = match code {
        ENUMERATED_PARAMETER => match enumerated_parameter(message) {
            Some("SearchIndex") => AwsErrorKind::InvalidSearchIndex,
            Some("ListType") => AwsErrorKind::InvalidListType,
            _ => AwsErrorKind::InvalidParameterValue,
        },
        INVALID_PARAMETER_VALUE
            if operation.is_some_and(Operation::is_cart) && names_cart_item(message) =>
        {
            AwsErrorKind::InvalidCartItem
        }
        _ => kind_for_code(code),
    };

    AwsError {
        kind,
        code: code.to_string(),
        message: message.to_string(),
    }
}

/// Looks up a code in [`ERROR_CODES`].
#[must_use]
pub fn kind_for_code(code: &str) -> AwsErrorKind {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(AwsErrorKind::Generic, |(_, kind)| *kind)
}

// "The value you specified for SearchIndex is invalid. Valid values include ..."
fn enumerated_parameter(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("specified for ")?;
    rest.split_whitespace().next()
}

fn names_cart_item(message: &str) -> bool {
    message
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| CART_ITEM_PARAMS.contains(&word))
}

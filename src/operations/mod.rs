//! The operation registry and request construction.
//!
//! Every call names an [`Operation`]. The registry knows, per operation,
//! which parameters are required, whether the service has retired it, which
//! parameter selects a result page, and which per-item error codes may be
//! ignored when the response still carries usable data.
//!
//! # Example
//!
//! ```rust
//! use amazon_product::operations::Operation;
//!
//! let op: Operation = "ItemSearch".parse().unwrap();
//! assert_eq!(op.required_params(), &["SearchIndex"]);
//! assert_eq!(op.page_counter(), Some("ItemPage"));
//!
//! let retired: Operation = "ListLookup".parse().unwrap();
//! assert!(retired.is_deprecated());
//! ```

mod request;

pub use request::{build_request, OperationRequest, SignedRequest, RESERVED_PARAMS};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when parsing an operation name that is not in the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown operation '{name}'. Operation names are case-sensitive (e.g., 'ItemLookup').")]
pub struct UnknownOperationError {
    /// The name that was provided.
    pub name: String,
}

/// Per-item error codes an operation may ignore.
///
/// The codes are ignored only while the envelope still holds at least one
/// element matching `payload_path`, and, when `names_param` is set, only if
/// the error message names that parameter. Otherwise they are fatal like any
/// other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tolerance {
    /// Vendor error codes that do not abort the call.
    pub codes: &'static [&'static str],
    /// Path expression that must match for the codes to be ignored.
    pub payload_path: &'static str,
    /// Parameter the error message must name for the code to be ignored.
    pub names_param: Option<&'static str>,
}

impl Tolerance {
    /// Returns `true` if an error entry with this code and message may be
    /// ignored, given that the payload is present.
    #[must_use]
    pub fn covers(&self, code: &str, message: &str) -> bool {
        self.codes.contains(&code)
            && self.names_param.map_or(true, |param| {
                message
                    .split(|c: char| !c.is_ascii_alphanumeric())
                    .any(|word| word == param)
            })
    }
}

const ITEMS_PAYLOAD: &str = "//Items/Item";

const SIMILARITY_TOLERANCE: Tolerance = Tolerance {
    codes: &["AWS.ECommerceService.NoSimilarities"],
    payload_path: ITEMS_PAYLOAD,
    names_param: None,
};

// One bad id among several; a bad value for any other parameter stays fatal.
const LOOKUP_TOLERANCE: Tolerance = Tolerance {
    codes: &["AWS.InvalidParameterValue"],
    payload_path: ITEMS_PAYLOAD,
    names_param: Some("ItemId"),
};

/// A named service operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Look up one or more items by id.
    ItemLookup,
    /// Search a catalog index.
    ItemSearch,
    /// Find items similar to the given ones.
    SimilarityLookup,
    /// Look up a browse node with its children and ancestors.
    BrowseNodeLookup,
    /// Look up a third-party seller.
    SellerLookup,
    /// Create a remote shopping cart.
    CartCreate,
    /// Add items to a cart.
    CartAdd,
    /// Change quantities of items in a cart.
    CartModify,
    /// Fetch a cart.
    CartGet,
    /// Remove all items from a cart.
    CartClear,
    /// Retired.
    CustomerContentLookup,
    /// Retired.
    CustomerContentSearch,
    /// Retired.
    Help,
    /// Retired.
    ListLookup,
    /// Retired.
    ListSearch,
    /// Retired.
    TagLookup,
    /// Retired.
    TransactionLookup,
    /// Retired.
    VehiclePartLookup,
    /// Retired.
    VehiclePartSearch,
    /// Retired.
    VehicleSearch,
}

impl Operation {
    /// Returns every operation in the registry.
    #[must_use]
    pub const fn all() -> [Self; 20] {
        [
            Self::ItemLookup,
            Self::ItemSearch,
            Self::SimilarityLookup,
            Self::BrowseNodeLookup,
            Self::SellerLookup,
            Self::CartCreate,
            Self::CartAdd,
            Self::CartModify,
            Self::CartGet,
            Self::CartClear,
            Self::CustomerContentLookup,
            Self::CustomerContentSearch,
            Self::Help,
            Self::ListLookup,
            Self::ListSearch,
            Self::TagLookup,
            Self::TransactionLookup,
            Self::VehiclePartLookup,
            Self::VehiclePartSearch,
            Self::VehicleSearch,
        ]
    }

    /// Returns the wire name sent as the `Operation` parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ItemLookup => "ItemLookup",
            Self::ItemSearch => "ItemSearch",
            Self::SimilarityLookup => "SimilarityLookup",
            Self::BrowseNodeLookup => "BrowseNodeLookup",
            Self::SellerLookup => "SellerLookup",
            Self::CartCreate => "CartCreate",
            Self::CartAdd => "CartAdd",
            Self::CartModify => "CartModify",
            Self::CartGet => "CartGet",
            Self::CartClear => "CartClear",
            Self::CustomerContentLookup => "CustomerContentLookup",
            Self::CustomerContentSearch => "CustomerContentSearch",
            Self::Help => "Help",
            Self::ListLookup => "ListLookup",
            Self::ListSearch => "ListSearch",
            Self::TagLookup => "TagLookup",
            Self::TransactionLookup => "TransactionLookup",
            Self::VehiclePartLookup => "VehiclePartLookup",
            Self::VehiclePartSearch => "VehiclePartSearch",
            Self::VehicleSearch => "VehicleSearch",
        }
    }

    /// Returns `true` for operations the service no longer answers.
    ///
    /// Calls to these are rejected before anything is sent.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::CustomerContentLookup
                | Self::CustomerContentSearch
                | Self::Help
                | Self::ListLookup
                | Self::ListSearch
                | Self::TagLookup
                | Self::TransactionLookup
                | Self::VehiclePartLookup
                | Self::VehiclePartSearch
                | Self::VehicleSearch
        )
    }

    /// Returns `true` for the cart operations.
    #[must_use]
    pub const fn is_cart(self) -> bool {
        matches!(
            self,
            Self::CartCreate | Self::CartAdd | Self::CartModify | Self::CartGet | Self::CartClear
        )
    }

    /// Returns the parameters a request must carry.
    #[must_use]
    pub const fn required_params(self) -> &'static [&'static str] {
        match self {
            Self::ItemLookup | Self::SimilarityLookup => &["ItemId"],
            Self::ItemSearch => &["SearchIndex"],
            Self::BrowseNodeLookup => &["BrowseNodeId"],
            Self::SellerLookup => &["SellerId"],
            Self::CartAdd | Self::CartModify | Self::CartGet | Self::CartClear => {
                &["CartId", "HMAC"]
            }
            _ => &[],
        }
    }

    /// Returns the parameter that selects a result page, for paginated
    /// operations.
    #[must_use]
    pub const fn page_counter(self) -> Option<&'static str> {
        match self {
            Self::ItemSearch => Some("ItemPage"),
            Self::ItemLookup => Some("ReviewPage"),
            _ => None,
        }
    }

    /// Returns the per-item error codes this operation may ignore.
    #[must_use]
    pub const fn tolerance(self) -> Option<Tolerance> {
        match self {
            Self::SimilarityLookup => Some(SIMILARITY_TOLERANCE),
            Self::ItemLookup => Some(LOOKUP_TOLERANCE),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperationError {
                name: s.to_string(),
            })
    }
}

//! Remote shopping carts.
//!
//! Cart items are validated before any request is sent, then encoded as
//! numbered parameters (`Item.1.ASIN`, `Item.1.Quantity`, ...). Responses are
//! read into a [`Cart`].

use thiserror::Error;

use crate::api::ApiError;
use crate::response::Envelope;
use crate::xml::{Element, XmlError};

/// Highest quantity a single cart line may have.
pub const MAX_QUANTITY: u32 = 999;

/// Cart items rejected before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartItemsError {
    /// No items were given.
    #[error("At least one cart item is required.")]
    Empty,

    /// An item id is blank.
    #[error("Cart item {position} has an empty id.")]
    EmptyItemId {
        /// 1-based position in the item list.
        position: usize,
    },

    /// A quantity is outside the allowed range.
    #[error("Quantity {quantity} for item '{item}' is out of range. Allowed: {min} to {max}.")]
    QuantityOutOfRange {
        /// The item id.
        item: String,
        /// The quantity given.
        quantity: u32,
        /// Lowest allowed quantity.
        min: u32,
        /// Highest allowed quantity.
        max: u32,
    },
}

/// Which id an item list is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemIdKind {
    /// Catalog ids, for creating a cart or adding to it. Quantity 0 is rejected.
    Asin,
    /// Cart line ids, for modifying a cart. Quantity 0 removes the line.
    CartItemId,
}

impl ItemIdKind {
    const fn param(self) -> &'static str {
        match self {
            Self::Asin => "ASIN",
            Self::CartItemId => "CartItemId",
        }
    }

    const fn min_quantity(self) -> u32 {
        match self {
            Self::Asin => 1,
            Self::CartItemId => 0,
        }
    }
}

/// Validates items and encodes them as request parameters.
///
/// # Errors
///
/// Returns [`CartItemsError`] if the list is empty, an id is blank, or a
/// quantity is out of range.
///
/// # Example
///
/// ```rust
/// use amazon_product::api::cart::{encode_items, ItemIdKind};
///
/// let params = encode_items(&[("0747532745", 2)], ItemIdKind::Asin).unwrap();
/// assert_eq!(params, vec![
///     ("Item.1.ASIN".to_string(), "0747532745".to_string()),
///     ("Item.1.Quantity".to_string(), "2".to_string()),
/// ]);
/// ```
pub fn encode_items(
    items: &[(&str, u32)],
    kind: ItemIdKind,
) -> Result<Vec<(String, String)>, CartItemsError> {
    if items.is_empty() {
        return Err(CartItemsError::Empty);
    }

    let min = kind.min_quantity();
    let mut params = Vec::with_capacity(items.len() * 2);
    for (idx, (id, quantity)) in items.iter().enumerate() {
        let position = idx + 1;
        let id = id.trim();
        if id.is_empty() {
            return Err(CartItemsError::EmptyItemId { position });
        }
        if !(min..=MAX_QUANTITY).contains(quantity) {
            return Err(CartItemsError::QuantityOutOfRange {
                item: id.to_string(),
                quantity: *quantity,
                min,
                max: MAX_QUANTITY,
            });
        }
        params.push((format!("Item.{position}.{}", kind.param()), id.to_string()));
        params.push((format!("Item.{position}.Quantity"), quantity.to_string()));
    }
    Ok(params)
}

/// One line of a cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartItem {
    /// The line id, used to modify the line.
    pub cart_item_id: String,
    /// The catalog id.
    pub asin: String,
    /// Units on this line.
    pub quantity: u32,
    /// Product title, when the service includes it.
    pub title: Option<String>,
}

/// A remote shopping cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cart {
    /// The cart id.
    pub cart_id: String,
    /// The HMAC that authorizes changes to the cart.
    pub hmac: String,
    /// The HMAC, percent-encoded for use in URLs.
    pub url_encoded_hmac: String,
    /// Checkout URL, when present.
    pub purchase_url: Option<String>,
    /// The cart lines.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Reads the first `Cart` element of an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Xml`] if the cart, its id or HMAC is missing, or a
    /// quantity is not a number.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ApiError> {
        let cart = envelope
            .find("//Cart")?
            .into_iter()
            .next()
            .ok_or_else(|| XmlError::MissingElement("Cart".to_string()))?;

        let items = cart
            .child("CartItems")
            .map(|list| {
                list.children()
                    .iter()
                    .filter(|e| e.name() == "CartItem")
                    .map(parse_item)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            cart_id: required_text(cart, "CartId")?,
            hmac: required_text(cart, "HMAC")?,
            url_encoded_hmac: cart.child_text("URLEncodedHMAC").unwrap_or_default().to_string(),
            purchase_url: cart.child_text("PurchaseURL").map(str::to_string),
            items,
        })
    }

    /// Returns the total number of units in the cart.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns `true` if the cart holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the line with the given line id.
    #[must_use]
    pub fn get(&self, cart_item_id: &str) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.cart_item_id == cart_item_id)
    }
}

fn required_text(element: &Element, name: &str) -> Result<String, XmlError> {
    element
        .child_text(name)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| XmlError::MissingElement(format!("Cart/{name}")))
}

fn parse_item(element: &Element) -> Result<CartItem, XmlError> {
    let raw_quantity = element.child_text("Quantity").unwrap_or_default();
    let quantity = raw_quantity
        .parse::<u32>()
        .map_err(|_| XmlError::InvalidValue {
            element: "Quantity".to_string(),
            value: raw_quantity.to_string(),
        })?;

    Ok(CartItem {
        cart_item_id: required_text(element, "CartItemId")?,
        asin: element.child_text("ASIN").unwrap_or_default().to_string(),
        quantity,
        title: element.child_text("Title").map(str::to_string),
    })
}

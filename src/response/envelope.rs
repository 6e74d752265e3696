//! The parsed response document.

use crate::xml::{parse, Element, XPath, XmlError};

/// One `<Error>` entry of a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Vendor error code, e.g. `AWS.InvalidParameterValue`.
    pub code: String,
    /// Vendor message, verbatim.
    pub message: String,
}

/// A parsed response.
///
/// An envelope that reaches the caller has passed error classification:
/// it either carries no error entries, or only entries its operation
/// tolerates. Those stay readable through [`Envelope::errors`].
///
/// # Example
///
/// ```rust
/// use amazon_product::response::Envelope;
///
/// let envelope = Envelope::parse(br#"
///     <ItemLookupResponse xmlns="http://webservices.amazon.com/AWSECommerceService/2011-08-01">
///       <Items><Item><ASIN>0747532745</ASIN></Item></Items>
///     </ItemLookupResponse>"#).unwrap();
///
/// assert_eq!(envelope.version(), Some("2011-08-01"));
/// let asins = envelope.find("//Items/Item/ASIN").unwrap();
/// assert_eq!(asins[0].text(), "0747532745");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    root: Element,
}

impl Envelope {
    /// Parses raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the body is not a well-formed document.
    pub fn parse(bytes: &[u8]) -> Result<Self, XmlError> {
        parse(bytes).map(Self::from_element)
    }

    /// Wraps an already parsed tree.
    #[must_use]
    pub const fn from_element(root: Element) -> Self {
        Self { root }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the default namespace declared on the root element.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.root.attribute("xmlns")
    }

    /// Returns the API version the service answered with, taken from the
    /// last segment of the namespace.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.namespace()
            .and_then(|ns| ns.trim_end_matches('/').rsplit('/').next())
            .filter(|v| !v.is_empty())
    }

    /// Returns the elements a path selects.
    #[must_use]
    pub fn select(&self, path: &XPath) -> Vec<&Element> {
        path.select(&self.root)
    }

    /// Returns the values a path selects.
    #[must_use]
    pub fn values(&self, path: &XPath) -> Vec<String> {
        path.values(&self.root)
    }

    /// Returns the first value a path selects.
    #[must_use]
    pub fn first_text(&self, path: &XPath) -> Option<String> {
        path.first_value(&self.root)
    }

    /// Parses `expr` and returns the elements it selects.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidPath`] if the expression cannot be parsed.
    pub fn find(&self, expr: &str) -> Result<Vec<&Element>, XmlError> {
        Ok(self.select(&expr.parse()?))
    }

    /// Returns `true` if `expr` is valid and selects at least one element.
    #[must_use]
    pub fn contains(&self, expr: &str) -> bool {
        self.find(expr).map_or(false, |found| !found.is_empty())
    }

    /// Returns the request id the service assigned, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .find(|e| e.name() == "OperationRequest")
            .and_then(|e| e.child_text("RequestId"))
    }

    /// Returns every error entry in document order.
    ///
    /// An entry is any `Error` element with a non-empty `Code` child.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorEntry> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .filter(|e| e.name() == "Error")
            .filter_map(|e| {
                let code = e.child_text("Code")?.trim();
                if code.is_empty() {
                    return None;
                }
                Some(ErrorEntry {
                    code: code.to_string(),
                    message: e.child_text("Message").unwrap_or_default().to_string(),
                })
            })
            .collect()
    }
}

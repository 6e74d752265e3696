//! Reading page counters out of envelopes.

use crate::response::Envelope;
use crate::xml::{XPath, XmlError};

/// How to read one number out of a response.
///
/// Chosen once when a [`super::PageSpec`] is built, not re-interpreted per
/// page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extractor {
    /// Element text parsed as an integer.
    Text(XPath),
    /// Attribute value parsed as an integer.
    Attribute(XPath),
    /// Always absent; the paginator counts it as zero.
    Absent,
}

impl Extractor {
    /// Builds an extractor from a path expression. An expression ending in
    /// `@attr` reads an attribute, anything else reads element text.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidPath`] if the expression cannot be parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use amazon_product::pagination::Extractor;
    ///
    /// let e = Extractor::new(r#"//Argument[@Name="ItemPage"]/@Value"#).unwrap();
    /// assert!(matches!(e, Extractor::Attribute(_)));
    /// ```
    pub fn new(expr: &str) -> Result<Self, XmlError> {
        let path: XPath = expr.parse()?;
        if path.selects_attribute() {
            Ok(Self::Attribute(path))
        } else {
            Ok(Self::Text(path))
        }
    }

    /// Reads the value. Missing nodes and non-numeric content give `None`.
    #[must_use]
    pub fn extract(&self, envelope: &Envelope) -> Option<u32> {
        match self {
            Self::Text(path) | Self::Attribute(path) => {
                envelope.first_text(path)?.trim().parse().ok()
            }
            Self::Absent => None,
        }
    }
}

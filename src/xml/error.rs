//! XML parsing and path evaluation errors.

use thiserror::Error;

/// Errors raised while parsing a response document or a path expression.
#[derive(Debug, Error)]
pub enum XmlError {
    /// An error from the underlying quick-xml reader.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Text or attribute content could not be decoded.
    #[error("Failed to decode XML content: {0}")]
    Decode(String),

    /// The document is well-formed token by token but not as a tree.
    #[error("Malformed XML document: {0}")]
    Malformed(String),

    /// The document contains no root element.
    #[error("XML document has no root element.")]
    MissingRoot,

    /// A required element was missing.
    #[error("Missing required XML element: {0}")]
    MissingElement(String),

    /// Element text could not be parsed as the expected type.
    #[error("Invalid value '{value}' in element <{element}>")]
    InvalidValue {
        /// The element name.
        element: String,
        /// The text that failed to parse.
        value: String,
    },

    /// A path expression could not be parsed.
    #[error("Invalid path expression '{path}': {reason}")]
    InvalidPath {
        /// The expression as given.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

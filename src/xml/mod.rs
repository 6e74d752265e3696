//! XML documents and path expressions.
//!
//! Responses are parsed with quick-xml into an owned [`Element`] tree and
//! navigated with [`XPath`], a small subset of XPath that covers what the
//! service's envelopes need.

mod error;
mod path;
mod tree;

pub use error::XmlError;
pub use path::XPath;
pub use tree::{parse, Element};

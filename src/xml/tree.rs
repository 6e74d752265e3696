//! A minimal owned element tree built from quick-xml events.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::xml::XmlError;

/// One element of a parsed document.
///
/// Element names are stored without their namespace prefix. Attribute keys
/// are stored as written, so the default namespace is available under
/// `xmlns`. Text is the concatenation of the element's own text nodes with
/// surrounding whitespace trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Creates an empty element with the given local name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element's own text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns all attributes as `(key, value)` pairs, keys as written.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns an attribute value.
    ///
    /// `name` matches either the key as written or its local part, so
    /// `Name` finds `aws:Name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|(key, _)| local_part(key) == name)
            })
            .map(|(_, value)| value.as_str())
    }

    /// Returns the child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the text of the first child with the given local name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Self::text)
    }

    /// Returns every element below this one, depth-first in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack: Vec<&Self> = self.children.iter().rev().collect();
        while let Some(element) = stack.pop() {
            out.push(element);
            stack.extend(element.children.iter().rev());
        }
        out
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the element text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Decode(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Parses a document into its root [`Element`].
///
/// # Errors
///
/// Returns [`XmlError`] if the document is not well-formed, has unclosed
/// elements, more than one root, or no root at all.
///
/// # Example
///
/// ```rust
/// use amazon_product::xml::parse;
///
/// let root = parse(br#"<Items><Item><ASIN>B000</ASIN></Item></Items>"#).unwrap();
/// assert_eq!(root.name(), "Items");
/// assert_eq!(root.child("Item").unwrap().child_text("ASIN"), Some("B000"));
/// ```
pub fn parse(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Element::from_start(&e)?),
            Event::Empty(e) => attach(&mut stack, &mut root, Element::from_start(&e)?)?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| XmlError::Decode(e.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Malformed(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    root.ok_or(XmlError::MissingRoot)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

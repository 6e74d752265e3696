//! A small XPath subset for navigating response envelopes.
//!
//! Supported forms:
//!
//! - `/A/B`: absolute, the first step must match the root
//! - `//A/B`: the first step matches at any depth
//! - `A/B`: relative to the root's children
//! - `*` matches any element name
//! - `A[@Name="v"]` keeps elements whose attribute equals a literal
//! - a trailing `@Name` selects an attribute value instead of element text
//!
//! Namespace prefixes (`aws:Items`) are accepted and ignored.

use std::fmt;
use std::str::FromStr;

use crate::xml::{Element, XmlError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Root,
    Descendant,
    Relative,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Step {
    name: Option<String>,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |n| n == element.name());
        let predicate_ok = self
            .predicate
            .as_ref()
            .map_or(true, |(key, value)| element.attribute(key) == Some(value.as_str()));
        name_ok && predicate_ok
    }
}

/// A parsed path expression.
///
/// # Example
///
/// ```rust
/// use amazon_product::xml::{parse, XPath};
///
/// let root = parse(br#"<R><Items><TotalPages>7</TotalPages></Items></R>"#).unwrap();
/// let path: XPath = "//aws:Items/aws:TotalPages".parse().unwrap();
/// assert_eq!(path.values(&root), vec!["7".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XPath {
    source: String,
    anchor: Anchor,
    steps: Vec<Step>,
    attribute: Option<String>,
}

impl XPath {
    /// Returns the expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the expression selects an attribute value.
    #[must_use]
    pub const fn selects_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// Returns the elements the steps select, in document order.
    ///
    /// A trailing `@attr` is ignored here; see [`XPath::values`].
    #[must_use]
    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let Some((first, rest)) = self.steps.split_first() else {
            return Vec::new();
        };

        let mut current: Vec<&Element> = match self.anchor {
            Anchor::Root => vec![root],
            Anchor::Descendant => std::iter::once(root).chain(root.descendants()).collect(),
            Anchor::Relative => root.children().iter().collect(),
        };
        current.retain(|element| first.matches(element));

        for step in rest {
            current = current
                .into_iter()
                .flat_map(|element| element.children().iter())
                .filter(|child| step.matches(child))
                .collect();
        }
        current
    }

    /// Returns the selected values: attribute values for a trailing `@attr`,
    /// element text otherwise.
    #[must_use]
    pub fn values(&self, root: &Element) -> Vec<String> {
        let selected = self.select(root);
        match &self.attribute {
            Some(attr) => selected
                .into_iter()
                .filter_map(|element| element.attribute(attr))
                .map(str::to_string)
                .collect(),
            None => selected
                .into_iter()
                .map(|element| element.text().to_string())
                .collect(),
        }
    }

    /// Returns the first selected value.
    #[must_use]
    pub fn first_value(&self, root: &Element) -> Option<String> {
        self.values(root).into_iter().next()
    }
}

impl fmt::Display for XPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for XPath {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        let invalid = |reason| XmlError::InvalidPath {
            path: source.to_string(),
            reason,
        };

        let (anchor, body) = if let Some(rest) = source.strip_prefix("//") {
            (Anchor::Descendant, rest)
        } else if let Some(rest) = source.strip_prefix('/') {
            (Anchor::Root, rest)
        } else {
            (Anchor::Relative, source)
        };

        let mut segments = split_segments(body).map_err(invalid)?;
        let attribute = match segments.last() {
            Some(last) if last.starts_with('@') => {
                let name = strip_prefix(&last[1..]);
                if !is_name(name) {
                    return Err(invalid("attribute name is empty or invalid"));
                }
                let name = name.to_string();
                segments.pop();
                Some(name)
            }
            _ => None,
        };

        if segments.is_empty() {
            return Err(invalid("expression has no element steps"));
        }

        let steps = segments
            .into_iter()
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        Ok(Self {
            source: source.to_string(),
            anchor,
            steps,
            attribute,
        })
    }
}

fn split_segments(body: &str) -> Result<Vec<&str>, &'static str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for (idx, c) in body.char_indices() {
        match (c, quote) {
            ('"' | '\'', None) if in_brackets => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (_, Some(_)) => {}
            ('[', None) => in_brackets = true,
            (']', None) => in_brackets = false,
            ('/', None) if !in_brackets => {
                segments.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if in_brackets || quote.is_some() {
        return Err("unterminated predicate");
    }
    segments.push(&body[start..]);

    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err("empty step");
    }
    Ok(segments)
}

fn parse_step(segment: &str) -> Result<Step, &'static str> {
    let (name, predicate) = match segment.split_once('[') {
        Some((name, rest)) => {
            let inner = rest
                .strip_suffix(']')
                .ok_or("predicate must close the step")?;
            (name, Some(parse_predicate(inner)?))
        }
        None => (segment, None),
    };

    let name = strip_prefix(name.trim());
    if name.starts_with('@') {
        return Err("attribute selection is only allowed as the last step");
    }
    let name = match name {
        "*" => None,
        n if is_name(n) => Some(n.to_string()),
        _ => return Err("element name is empty or invalid"),
    };
    Ok(Step { name, predicate })
}

fn parse_predicate(inner: &str) -> Result<(String, String), &'static str> {
    let (key, value) = inner
        .split_once('=')
        .ok_or("predicate must have the form @Name=\"value\"")?;
    let key = key
        .trim()
        .strip_prefix('@')
        .ok_or("predicate must test an attribute")?;
    let key = strip_prefix(key);
    if !is_name(key) {
        return Err("predicate attribute name is invalid");
    }

    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .ok_or("predicate value must be quoted")?;
    Ok((key.to_string(), unquoted.to_string()))
}

fn strip_prefix(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    const DOC: &[u8] = br#"
        <ItemSearchResponse xmlns="http://webservices.amazon.com/AWSECommerceService/2011-08-01">
          <OperationRequest>
            <Arguments>
              <Argument Name="Operation" Value="ItemSearch"/>
              <Argument Name="ItemPage" Value="3"/>
            </Arguments>
          </OperationRequest>
          <Items>
            <Request><ItemSearchRequest><ItemPage>3</ItemPage></ItemSearchRequest></Request>
            <TotalResults>1234</TotalResults>
            <TotalPages>124</TotalPages>
            <Item><ASIN>A1</ASIN></Item>
            <Item><ASIN>A2</ASIN></Item>
          </Items>
        </ItemSearchResponse>"#;

    fn values(expr: &str) -> Vec<String> {
        let root = parse(DOC).unwrap();
        expr.parse::<XPath>().unwrap().values(&root)
    }

    #[test]
    fn test_descendant_path_with_prefixes() {
        assert_eq!(values("//aws:Items/aws:TotalPages"), vec!["124"]);
        assert_eq!(
            values("//aws:Items/aws:Request/aws:ItemSearchRequest/aws:ItemPage"),
            vec!["3"]
        );
    }

    #[test]
    fn test_absolute_and_relative_paths() {
        assert_eq!(values("/ItemSearchResponse/Items/TotalResults"), vec!["1234"]);
        assert!(values("/Items/TotalResults").is_empty());
        assert_eq!(values("Items/Item/ASIN"), vec!["A1", "A2"]);
    }

    #[test]
    fn test_wildcard_step() {
        assert_eq!(values("//Items/*/ASIN"), vec!["A1", "A2"]);
    }

    #[test]
    fn test_attribute_with_predicate() {
        assert_eq!(
            values(r#"//aws:OperationRequest/aws:Arguments/aws:Argument[@Name="ItemPage"]/@Value"#),
            vec!["3"]
        );
        assert!(values(r#"//Argument[@Name='Missing']/@Value"#).is_empty());
    }

    #[test]
    fn test_predicate_value_may_contain_slash() {
        let root = parse(br#"<R><A k="x/y">hit</A><A k="z">miss</A></R>"#).unwrap();
        let path: XPath = r#"//A[@k="x/y"]"#.parse().unwrap();
        assert_eq!(path.values(&root), vec!["hit"]);
    }

    #[test]
    fn test_invalid_expressions_are_rejected() {
        for expr in ["", "//", "/a//b", "a/@b/c", "a[@b=\"c\"", "a[b=\"c\"]", "a[@b=c]", "//@"] {
            assert!(
                matches!(expr.parse::<XPath>(), Err(XmlError::InvalidPath { .. })),
                "{expr} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_source() {
        let path: XPath = "//Items/TotalPages".parse().unwrap();
        assert_eq!(path.to_string(), "//Items/TotalPages");
        assert!(!path.selects_attribute());
    }
}

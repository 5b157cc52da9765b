//! Owned element tree implementing [`DocNode`].
//!
//! JSON shape (every field except `tag` optional):
//!
//! ```json
//! { "tag": "source", "attributes": { "id": "t" },
//!   "children": [ { "tag": "float_array", "text": "0 0.5 1" } ] }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::DocNode;

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("document parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected <{expected}> as document root, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    /// Attributes in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set (or replace) an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Parse an element tree from its JSON mirror.
    pub fn from_json(s: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse an element tree and check the root tag.
    pub fn from_json_rooted(s: &str, expected: &str) -> Result<Self, DocumentError> {
        let root = Self::from_json(s)?;
        if root.tag != expected {
            return Err(DocumentError::UnexpectedRoot {
                expected: expected.to_string(),
                found: root.tag,
            });
        }
        Ok(root)
    }
}

impl DocNode for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attribute_is_present_but_not_nonempty() {
        let el = Element::new("input").with_attr("semantic", "");
        assert_eq!(el.attr("semantic"), Some(""));
        assert_eq!(el.attr_nonempty("semantic"), None);
        assert_eq!(el.attr("source"), None);
    }

    #[test]
    fn find_all_keeps_document_order_and_skips_other_tags() {
        let el = Element::new("animation")
            .with_child(Element::new("sampler").with_attr("id", "a"))
            .with_child(Element::new("channel"))
            .with_child(Element::new("sampler").with_attr("id", "b"));
        let ids: Vec<_> = el.find_all("sampler").filter_map(|s| s.attr("id")).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(el.find("channel").map(|c| c.tag()), Some("channel"));
        assert!(el.find("source").is_none());
    }

    #[test]
    fn json_fields_default_when_omitted() {
        let el = Element::from_json(r#"{"tag":"float_array","text":"1 2 3"}"#).unwrap();
        assert!(el.attributes.is_empty());
        assert!(el.children.is_empty());
        assert_eq!(el.text(), Some("1 2 3"));
    }

    #[test]
    fn rooted_parse_rejects_wrong_root() {
        let err = Element::from_json_rooted(r#"{"tag":"source"}"#, "animation").unwrap_err();
        assert!(matches!(err, DocumentError::UnexpectedRoot { ref found, .. } if found == "source"));
    }
}

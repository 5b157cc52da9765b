//! Reference strings and document locations.

use std::fmt;

/// A document-local reference such as `"#walk-time"`.
///
/// The first character marks the address kind and is stripped
/// unconditionally; the remainder is the scope key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    raw: &'a str,
    key: &'a str,
}

impl<'a> Reference<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut chars = raw.chars();
        chars.next();
        Self {
            raw,
            key: chars.as_str(),
        }
    }

    /// The address-kind marker, usually `'#'`.
    pub fn marker(&self) -> Option<char> {
        self.raw.chars().next()
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }
}

/// Location of an element in the loaded document, e.g.
/// `animation#walk/animation[1]/channel[0]`.
///
/// Elements carrying a non-empty id are addressed by it, others by their
/// position among same-tag siblings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DocPath(String);

impl DocPath {
    pub fn root(tag: &str, id: Option<&str>) -> Self {
        Self(segment(tag, None, id))
    }

    pub fn child(&self, tag: &str, index: usize, id: Option<&str>) -> Self {
        Self(format!("{}/{}", self.0, segment(tag, Some(index), id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn segment(tag: &str, index: Option<usize>, id: Option<&str>) -> String {
    match (id.filter(|id| !id.is_empty()), index) {
        (Some(id), _) => format!("{tag}#{id}"),
        (None, Some(index)) => format!("{tag}[{index}]"),
        (None, None) => tag.to_string(),
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

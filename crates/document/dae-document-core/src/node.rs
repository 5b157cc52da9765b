//! Read-only view over one element of a scene document.
//!
//! Loaders need three things from the document layer: string attributes, raw
//! text content, and child elements enumerated in document order. Anything
//! that can answer those (an XML DOM, a JSON mirror of one, a tree built by
//! hand in a test) can be loaded.

pub trait DocNode: Sized {
    /// Element tag name without namespace prefix (e.g. "animation").
    fn tag(&self) -> &str;

    /// Raw attribute value, `None` when the attribute is absent.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Text content of the element, if any.
    fn text(&self) -> Option<&str>;

    /// Child elements in document order.
    fn elements(&self) -> impl Iterator<Item = &Self>;

    /// Attribute value, treating an empty string the same as absence.
    fn attr_nonempty(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// Child elements with the given tag, in document order.
    fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.elements().filter(move |child| child.tag() == tag)
    }

    /// First child element with the given tag.
    fn find(&self, tag: &str) -> Option<&Self> {
        self.elements().find(|child| child.tag() == tag)
    }
}

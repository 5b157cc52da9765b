//! dae-document-core: the element-tree seam scene loaders read from.
//!
//! Loaders in this workspace never touch markup directly. They consume any
//! type implementing [`DocNode`]; [`Element`] is the owned implementation used
//! by fixtures, tests and hosts that mirror their document into JSON.

pub mod element;
pub mod node;

pub use element::{DocumentError, Element};
pub use node::DocNode;

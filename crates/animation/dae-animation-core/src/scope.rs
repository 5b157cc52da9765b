//! Layered, persistent source scope.
//!
//! Each animation pushes one immutable layer holding the sources it declares
//! on top of the scope it inherited. Layers are shared by `Arc`, so a child
//! sees its ancestors' sources and nothing from sibling branches.
//!
//! Lookup gives the outermost binding of an id: the first writer in the
//! ancestor chain wins. Within one layer the last declaration wins.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::{LoadError, ReferenceKind};
use crate::ids::Reference;
use crate::source::ValueSource;

#[derive(Clone, Debug, Default)]
pub struct Scope {
    head: Option<Arc<Layer>>,
}

#[derive(Debug)]
struct Layer {
    sources: IndexMap<String, Arc<ValueSource>>,
    parent: Scope,
}

impl Scope {
    /// The root scope: nothing visible.
    pub fn empty() -> Self {
        Self::default()
    }

    /// New scope with `sources` layered over `self`.
    pub fn extend(&self, sources: IndexMap<String, Arc<ValueSource>>) -> Scope {
        Scope {
            head: Some(Arc::new(Layer {
                sources,
                parent: self.clone(),
            })),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ValueSource>> {
        let layer = self.head.as_deref()?;
        layer.parent.get(id).or_else(|| layer.sources.get(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a sigil-prefixed reference (`"#id"`) to a visible source.
    pub fn resolve(&self, reference: &str) -> Result<&Arc<ValueSource>, LoadError> {
        let key = Reference::parse(reference).key();
        log::trace!("resolving source '{key}'");
        self.get(key)
            .ok_or_else(|| LoadError::unresolved(ReferenceKind::Source, reference))
    }

    /// Sources declared by the innermost layer, in declaration order.
    pub fn local(&self) -> impl Iterator<Item = &Arc<ValueSource>> {
        self.head.iter().flat_map(|layer| layer.sources.values())
    }

    /// The scope this one was layered over.
    pub fn parent(&self) -> Option<&Scope> {
        self.head.as_deref().map(|layer| &layer.parent)
    }

    /// Number of layers (0 for the root scope).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self;
        while let Some(layer) = cursor.head.as_deref() {
            depth += 1;
            cursor = &layer.parent;
        }
        depth
    }

    /// Every visible id once, outermost layer first.
    pub fn ids(&self) -> Vec<&str> {
        let mut layers = Vec::new();
        let mut cursor = self;
        while let Some(layer) = cursor.head.as_deref() {
            layers.push(layer);
            cursor = &layer.parent;
        }
        let mut seen = IndexSet::new();
        for layer in layers.into_iter().rev() {
            seen.extend(layer.sources.keys().map(String::as_str));
        }
        seen.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! The loaded `<animation>` tree.

use std::fmt;
use std::sync::Arc;

use crate::channel::Channel;
use crate::ids::DocPath;
use crate::sampler::Sampler;
use crate::scope::Scope;
use crate::source::ValueSource;

/// One `<animation>` node. Built once by the loader, read-only afterwards.
#[derive(Clone, Debug)]
pub struct Animation {
    id: Option<String>,
    name: Option<String>,
    scope: Scope,
    samplers: Vec<Arc<Sampler>>,
    channels: Vec<Channel>,
    children: Vec<Animation>,
    origin: DocPath,
}

impl Animation {
    pub(crate) fn new(
        id: Option<String>,
        name: Option<String>,
        scope: Scope,
        samplers: Vec<Arc<Sampler>>,
        channels: Vec<Channel>,
        children: Vec<Animation>,
        origin: DocPath,
    ) -> Self {
        Self {
            id,
            name,
            scope,
            samplers,
            channels,
            children,
            origin,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sources visible here: this node's declarations layered over its ancestors'.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Sources declared directly on this node.
    pub fn sources(&self) -> impl Iterator<Item = &Arc<ValueSource>> {
        self.scope.local()
    }

    /// Look up a visible source by id (no sigil).
    pub fn source(&self, id: &str) -> Option<&Arc<ValueSource>> {
        self.scope.get(id)
    }

    pub fn samplers(&self) -> &[Arc<Sampler>] {
        &self.samplers
    }

    pub fn sampler(&self, id: &str) -> Option<&Arc<Sampler>> {
        self.samplers.iter().find(|s| s.id() == Some(id))
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn children(&self) -> &[Animation] {
        &self.children
    }

    /// Where in the document this node came from.
    pub fn origin(&self) -> &DocPath {
        &self.origin
    }

    /// This node and all descendants, depth-first, document order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// First node in [`Animation::walk`] order with the given id.
    pub fn find(&self, id: &str) -> Option<&Animation> {
        self.walk().find(|anim| anim.id() == Some(id))
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Animation id={}, children={}>",
            self.id.as_deref().unwrap_or_default(),
            self.children.len()
        )
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Animation>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Animation;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

//! Channels (`<channel source="#sampler" target="node/prop">`).

use std::fmt;
use std::sync::Arc;

use dae_document_core::DocNode;

use crate::error::{LoadError, ReferenceKind};
use crate::ids::Reference;
use crate::sampler::{Sampler, SamplerTable};

/// Binds a sampler of the same animation to a target property path.
#[derive(Clone, Debug)]
pub struct Channel {
    sampler: Arc<Sampler>,
    target: String,
}

impl Channel {
    pub fn new(sampler: Arc<Sampler>, target: impl Into<String>) -> Self {
        Self {
            sampler,
            target: target.into(),
        }
    }

    /// The sampler this channel reads from (the document calls it `source`).
    pub fn sampler(&self) -> &Arc<Sampler> {
        &self.sampler
    }

    /// Target path exactly as written in the document.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Channel source={} target={}>", self.sampler, self.target)
    }
}

/// Resolve a `<channel>` against the samplers of its own animation.
pub fn load_channel<N: DocNode>(node: &N, samplers: &SamplerTable) -> Result<Channel, LoadError> {
    let reference = node
        .attr_nonempty("source")
        .ok_or_else(|| LoadError::missing("channel", "source"))?;
    let target = node
        .attr_nonempty("target")
        .ok_or_else(|| LoadError::missing("channel", "target"))?;

    let key = Reference::parse(reference).key();
    let sampler = samplers
        .get(key)
        .ok_or_else(|| LoadError::unresolved(ReferenceKind::Sampler, reference))?;
    log::trace!("channel {reference} -> {target}");
    Ok(Channel::new(Arc::clone(sampler), target))
}

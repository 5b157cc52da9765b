//! Builds [`Animation`] trees from document nodes.
//!
//! Each `<animation>` passes through sources → samplers → channels → children,
//! in that order, with no backtracking. A failing sampler, channel or nested
//! animation is handed to the configured [`ErrorPolicy`]: lenient loads record
//! a [`Diagnostic`] and skip just that unit, strict loads abort.
//!
//! Sources are not isolated individually: a bad `<source>` fails the animation
//! declaring it, which is then skipped by its parent like any other child.

use std::sync::Arc;

use dae_document_core::DocNode;
use indexmap::IndexMap;

use crate::animation::Animation;
use crate::channel::load_channel;
use crate::config::{ErrorPolicy, LoaderConfig};
use crate::diagnostics::{Diagnostic, LoadReport};
use crate::error::LoadError;
use crate::ids::DocPath;
use crate::sampler::{load_sampler, SamplerTable};
use crate::scope::Scope;
use crate::source::{load_source, SourceIndex};

#[derive(Clone, Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a root `<animation>` with an empty inherited scope.
    ///
    /// Fails outright only when the root itself cannot be built (a bad source
    /// on the root) or, under [`ErrorPolicy::Strict`], at the first fault.
    pub fn load_animation<N: DocNode>(&self, node: &N) -> Result<LoadReport<Animation>, LoadError> {
        self.load_animation_in(node, &Scope::empty())
    }

    /// Load an `<animation>` whose references may also resolve against `scope`.
    pub fn load_animation_in<N: DocNode>(
        &self,
        node: &N,
        scope: &Scope,
    ) -> Result<LoadReport<Animation>, LoadError> {
        let mut ctx = LoadContext::new(&self.config);
        let origin = DocPath::root(node.tag(), node.attr("id"));
        let animation = ctx.animation(node, scope, origin, 0)?;
        Ok(ctx.finish(animation))
    }

    /// Load every `<animation>` directly under a container such as
    /// `<library_animations>`, each from an empty scope.
    pub fn load_library<N: DocNode>(&self, node: &N) -> Result<LoadReport<Vec<Animation>>, LoadError> {
        let mut ctx = LoadContext::new(&self.config);
        let root = DocPath::root(node.tag(), node.attr("id"));
        let mut animations = Vec::new();
        for (index, child) in node.find_all("animation").enumerate() {
            let origin = root.child("animation", index, child.attr("id"));
            match ctx.animation(child, &Scope::empty(), origin.clone(), 0) {
                Ok(animation) => animations.push(animation),
                Err(err) => ctx.recover(origin, err)?,
            }
        }
        Ok(ctx.finish(animations))
    }
}

/// Lenient load: best-effort tree plus diagnostics.
pub fn load_animation<N: DocNode>(node: &N) -> Result<LoadReport<Animation>, LoadError> {
    Loader::default().load_animation(node)
}

/// Strict load: the first fault anywhere aborts with no partial tree.
pub fn load_animation_strict<N: DocNode>(node: &N) -> Result<Animation, LoadError> {
    Loader::new(LoaderConfig::strict())
        .load_animation(node)
        .map(|report| report.value)
}

struct LoadContext<'c> {
    config: &'c LoaderConfig,
    diagnostics: Vec<Diagnostic>,
    sources: SourceIndex,
}

impl<'c> LoadContext<'c> {
    fn new(config: &'c LoaderConfig) -> Self {
        Self {
            config,
            diagnostics: Vec::new(),
            sources: SourceIndex::default(),
        }
    }

    fn finish<T>(self, value: T) -> LoadReport<T> {
        LoadReport {
            value,
            diagnostics: self.diagnostics,
            sources: self.sources,
        }
    }

    /// Apply the error policy to a fault in the unit at `location`.
    fn recover(&mut self, location: DocPath, error: LoadError) -> Result<(), LoadError> {
        match self.config.policy {
            ErrorPolicy::Strict => Err(error),
            ErrorPolicy::Lenient => {
                log::warn!("skipping {location} ({}): {error}", error.category());
                self.diagnostics.push(Diagnostic { location, error });
                Ok(())
            }
        }
    }

    fn animation<N: DocNode>(
        &mut self,
        node: &N,
        inherited: &Scope,
        origin: DocPath,
        depth: usize,
    ) -> Result<Animation, LoadError> {
        if depth > self.config.max_depth {
            return Err(LoadError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        let id = node.attr("id").map(str::to_owned);
        let name = node.attr("name").map(str::to_owned);

        let mut loaded = Vec::new();
        for source_node in node.find_all("source") {
            let source = Arc::new(load_source(source_node)?);
            if inherited.contains(source.id()) {
                log::warn!(
                    "{origin}: source '{}' is already declared by an ancestor; the ancestor's binding stays visible",
                    source.id()
                );
            }
            loaded.push(source);
        }
        // Only a complete source stage is indexed; a failed animation adds nothing.
        let mut declared = IndexMap::new();
        for source in loaded {
            self.sources.insert(Arc::clone(&source));
            declared.insert(source.id().to_owned(), source);
        }
        let scope = inherited.extend(declared);

        let mut samplers = SamplerTable::default();
        for (index, sampler_node) in node.find_all("sampler").enumerate() {
            match load_sampler(sampler_node, &scope) {
                Ok(sampler) => samplers.insert(sampler),
                Err(err) => {
                    self.recover(origin.child("sampler", index, sampler_node.attr("id")), err)?
                }
            }
        }

        let mut channels = Vec::new();
        for (index, channel_node) in node.find_all("channel").enumerate() {
            match load_channel(channel_node, &samplers) {
                Ok(channel) => channels.push(channel),
                Err(err) => self.recover(origin.child("channel", index, None), err)?,
            }
        }

        let mut children = Vec::new();
        for (index, child_node) in node.find_all("animation").enumerate() {
            let child_origin = origin.child("animation", index, child_node.attr("id"));
            match self.animation(child_node, &scope, child_origin.clone(), depth + 1) {
                Ok(child) => children.push(child),
                Err(err) => self.recover(child_origin, err)?,
            }
        }

        log::debug!(
            "loaded {origin}: {} sources, {} samplers, {} channels, {} children",
            scope.local().count(),
            samplers.len(),
            channels.len(),
            children.len()
        );
        Ok(Animation::new(
            id,
            name,
            scope,
            samplers.into_vec(),
            channels,
            children,
            origin,
        ))
    }
}

//! dae-animation-core
//!
//! Loads `<animation>` elements of a scene document into a read-only object
//! graph: value sources, samplers, channels and nested animations, with every
//! document-local reference resolved to a shared handle.
//!
//! Resolution is scoped: an animation sees the sources it declares plus those
//! of its ancestors, never those of sibling branches (see [`scope`]). Faults
//! are confined to the smallest unit that can be dropped (one sampler, one
//! channel, one nested animation) and returned as diagnostics next to the
//! best-effort tree (see [`loader`]).

pub mod animation;
pub mod channel;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ids;
pub mod loader;
pub mod sampler;
pub mod scope;
pub mod source;

// Re-exports for consumers
pub use animation::{Animation, Walk};
pub use channel::{load_channel, Channel};
pub use config::{ErrorPolicy, LoaderConfig};
pub use diagnostics::{Diagnostic, LoadReport};
pub use error::{LoadError, ReferenceKind};
pub use ids::{DocPath, Reference};
pub use loader::{load_animation, load_animation_strict, Loader};
pub use sampler::{
    load_input, load_sampler, Input, InterpolationKind, Sampler, SamplerTable, Semantic,
};
pub use scope::Scope;
pub use source::{load_source, SourceData, SourceIndex, ValueSource};

pub use dae_document_core::{DocNode, Element};

//! Error types for animation loading

use std::fmt;

use crate::sampler::Semantic;

/// What a reference string was expected to name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A `<source>` visible in the current scope.
    Source,
    /// A `<sampler>` of the same animation.
    Sampler,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::Source => "source",
            ReferenceKind::Sampler => "sampler",
        })
    }
}

/// Faults raised while loading (or, for `RoleNotFound`, consuming) an animation tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LoadError {
    /// A required attribute is absent or empty
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A reference does not name anything in the visible scope
    #[error("{kind} reference '{reference}' not found")]
    UnresolvedReference {
        kind: ReferenceKind,
        reference: String,
    },

    /// Sampler lacks an input with the requested semantic
    #[error("sampler '{sampler}' has no input with semantic {semantic}")]
    RoleNotFound { sampler: String, semantic: Semantic },

    /// Array payload or accessor could not be decoded
    #[error("malformed <{element}>: {reason}")]
    MalformedData {
        element: &'static str,
        reason: String,
    },

    /// Animation nesting deeper than the configured limit
    #[error("animation nesting exceeds depth limit {limit}")]
    DepthExceeded { limit: usize },
}

impl LoadError {
    pub(crate) fn missing(element: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute { element, attribute }
    }

    pub(crate) fn unresolved(kind: ReferenceKind, reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            kind,
            reference: reference.into(),
        }
    }

    pub(crate) fn malformed(element: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedData {
            element,
            reason: reason.into(),
        }
    }

    /// Whether the loader may skip the offending unit and continue.
    ///
    /// `RoleNotFound` never reaches the loader; it is raised by consumers.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::RoleNotFound { .. })
    }

    /// Error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingAttribute { .. } | Self::MalformedData { .. } => "document",
            Self::UnresolvedReference { .. } => "reference",
            Self::RoleNotFound { .. } => "access",
            Self::DepthExceeded { .. } => "limits",
        }
    }
}

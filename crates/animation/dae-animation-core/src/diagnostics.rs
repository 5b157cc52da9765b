//! Recovered faults and the load result that carries them.

use std::fmt;

use crate::error::LoadError;
use crate::ids::DocPath;
use crate::source::SourceIndex;

/// A fault the loader recovered from by skipping one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// The skipped element.
    pub location: DocPath,
    pub error: LoadError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.error)
    }
}

/// Best-effort load result.
#[derive(Clone, Debug)]
pub struct LoadReport<T> {
    pub value: T,
    /// One entry per skipped sampler, channel or nested animation, in load order.
    pub diagnostics: Vec<Diagnostic>,
    /// Every source loaded, flat, in document order.
    pub sources: SourceIndex,
}

impl<T> LoadReport<T> {
    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The value, or the first recovered fault as a hard error.
    pub fn into_strict(self) -> Result<T, LoadError> {
        match self.diagnostics.into_iter().next() {
            Some(diagnostic) => Err(diagnostic.error),
            None => Ok(self.value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadReport<U> {
        LoadReport {
            value: f(self.value),
            diagnostics: self.diagnostics,
            sources: self.sources,
        }
    }
}

//! Loader configuration.

use serde::{Deserialize, Serialize};

/// What happens when a sampler, channel or nested animation fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record a diagnostic, skip the unit, keep loading.
    #[default]
    Lenient,
    /// Abort the whole load at the first fault; no partial tree is returned.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub policy: ErrorPolicy,
    /// Deepest `<animation>` nesting accepted below the root (root is depth 0).
    pub max_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            policy: ErrorPolicy::Lenient,
            max_depth: 64,
        }
    }
}

impl LoaderConfig {
    pub fn strict() -> Self {
        Self {
            policy: ErrorPolicy::Strict,
            ..Self::default()
        }
    }
}

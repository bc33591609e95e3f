//! Engine configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! max_results = 500
//! max_depth = 1024
//! state_any = "present"
//! honor_invert = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default drill-down depth before a branch is abandoned.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// How a state criterion under `Any` is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateAnyPolarity {
    /// At least one requested state is present on the object.
    #[default]
    Present,
    /// At least one requested state is absent from the object.
    ///
    /// Matches the behaviour of older AT-SPI bridges.
    LegacyAbsent,
}

/// Settings shared by every query run through one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Upper bound on results for any query, on top of the caller's limit.
    /// 0 means no bound.
    pub max_results: u32,
    /// Maximum depth a walk descends below its starting container.
    pub max_depth: usize,
    pub state_any: StateAnyPolarity,
    /// Whether a rule's `invert` flag negates the match. When false the flag
    /// is carried but ignored.
    pub honor_invert: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_results: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            state_any: StateAnyPolarity::default(),
            honor_invert: false,
        }
    }
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::config_io(path, source))?;
        Self::from_toml_str(&text)
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_state_any(mut self, polarity: StateAnyPolarity) -> Self {
        self.state_any = polarity;
        self
    }

    pub fn with_honor_invert(mut self, honor: bool) -> Self {
        self.honor_invert = honor;
        self
    }

    /// Combine a caller's limit (0 = unbounded) with [`max_results`](Self::max_results).
    pub fn effective_limit(&self, requested: usize) -> usize {
        let ceiling = self.max_results as usize;
        match (requested, ceiling) {
            (0, ceiling) => ceiling,
            (requested, 0) => requested,
            (requested, ceiling) => requested.min(ceiling),
        }
    }
}

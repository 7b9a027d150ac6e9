//! Run configuration loaded from TOML.
//!
//! Every section is optional; a missing section or key takes the default
//! shown below, so an empty file is a valid configuration.
//!
//! ```toml
//! [tools]
//! search = "web_search"
//! fetch = "document_fetcher"
//! classify = "summarize_and_classify"
//!
//! [search]
//! max_urls = 4
//!
//! [query]
//! top_k = 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    step::{RawStep, Step},
};
use claimcheck_core::{DEFAULT_MAX_URLS, DEFAULT_TOP_K};

use crate::tools::ToolNames;

/// Search-observation parsing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// At most this many URLs are taken from one search observation.
    pub max_urls: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_urls: DEFAULT_MAX_URLS,
        }
    }
}

/// Query settings for reports and the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// How many supporting and refuting snippets a report lists.
    pub top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Top-level claimcheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tools: ToolNames,
    pub search: SearchConfig,
    pub query: QueryConfig,
}

impl RunConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `ClaimCheckError::Config` if the TOML is malformed or a key
    /// has the wrong type.
    pub fn from_toml_str(s: &str) -> ClaimCheckResult<Self> {
        let config: RunConfig = toml::from_str(s).map_err(|e| ClaimCheckError::Config {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        debug!(
            max_urls = config.search.max_urls,
            top_k = config.query.top_k,
            "run config loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> ClaimCheckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClaimCheckError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Turn a recorded step into one the processor can dispatch on.
    pub fn resolve_step(&self, raw: &RawStep) -> Step {
        Step::new(
            self.tools.resolve(&raw.tool_name),
            raw.tool_input.clone(),
            raw.observation.clone(),
        )
    }
}

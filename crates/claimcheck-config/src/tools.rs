//! Mapping from planner tool names to `ToolKind`.
//!
//! The planner records the tool it invoked by name. Which names mean
//! search, fetch and classify is a deployment concern, so the mapping lives
//! here and the core only ever sees a resolved `ToolKind`.
//!
//! Example in TOML:
//! ```toml
//! [tools]
//! search = "web_search"
//! fetch = "document_fetcher"
//! classify = "summarize_and_classify"
//! ```

use serde::{Deserialize, Serialize};

use claimcheck_contracts::step::ToolKind;

/// Planner tool names for the three tools the step processor interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNames {
    pub search: String,
    pub fetch: String,
    pub classify: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            search: "web_search".to_string(),
            fetch: "document_fetcher".to_string(),
            classify: "summarize_and_classify".to_string(),
        }
    }
}

impl ToolNames {
    /// Resolve a recorded tool name.
    ///
    /// Matches the configured names first, then the canonical kind names
    /// (`search`, `fetch`, `classify`). Surrounding whitespace is ignored.
    /// Anything else becomes `ToolKind::Other` carrying the name as recorded.
    pub fn resolve(&self, name: &str) -> ToolKind {
        let name = name.trim();
        if name == self.search || name == "search" {
            ToolKind::Search
        } else if name == self.fetch || name == "fetch" {
            ToolKind::Fetch
        } else if name == self.classify || name == "classify" {
            ToolKind::Classify
        } else {
            ToolKind::Other(name.to_string())
        }
    }
}

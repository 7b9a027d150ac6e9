//! Step records consumed from the external planner, and what processing them
//! produced.
//!
//! `RawStep` is the wire shape: three strings, tool name included. It is
//! resolved into a `Step` carrying a closed `ToolKind` before it reaches the
//! step processor. `TraceEntry` is what gets written to the trace, one per
//! step, whatever the outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, Stance};

/// One (action, observation) pair as emitted by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStep {
    /// Name of the tool the planner invoked.
    pub tool_name: String,
    /// The tool's input (the query for search, the URL for fetch).
    #[serde(default)]
    pub tool_input: String,
    /// Raw text the tool returned. Absent or null means the tool returned nothing.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub observation: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The tools the step processor knows how to interpret.
///
/// `Other` keeps unrecognized tools forward-compatible: they are traced and
/// otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Web search; observation is newline-separated URLs.
    Search,
    /// Document fetch; input is the URL, observation the fetched text.
    Fetch,
    /// Summarize-and-classify; observation is a JSON classification record.
    Classify,
    /// Anything else, keyed by the planner's tool name.
    Other(String),
}

impl ToolKind {
    /// Short name used in traces and logs.
    pub fn name(&self) -> &str {
        match self {
            ToolKind::Search => "search",
            ToolKind::Fetch => "fetch",
            ToolKind::Classify => "classify",
            ToolKind::Other(name) => name,
        }
    }
}

/// A resolved step ready for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub tool: ToolKind,
    pub input: String,
    pub observation: String,
}

impl Step {
    pub fn new(tool: ToolKind, input: impl Into<String>, observation: impl Into<String>) -> Self {
        Self {
            tool,
            input: input.into(),
            observation: observation.into(),
        }
    }
}

/// The decoded body of a classify-tool observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub summary: String,
    pub label: String,
    pub score: f64,
}

impl Classification {
    pub fn stance(&self) -> Stance {
        Stance::from_label(&self.label)
    }
}

/// What a successfully processed step did to the claim's evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Search results parsed; no graph mutation.
    Searched { urls: Vec<String> },
    /// A document node and its `cites` edge were created.
    Ingested { document: NodeId, url: String },
    /// The fetch returned nothing usable; nothing was created.
    SkippedEmptyFetch { url: String },
    /// A snippet node was created. Linked stances also got an edge and a score.
    Classified { snippet: NodeId, stance: Stance, score: f64 },
    /// Unrecognized tool; nothing was created.
    Ignored { tool: String },
}

/// A step whose contribution was dropped without aborting the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: u64,
    pub tool: String,
    pub reason: String,
}

/// A record of one processed step, written to the trace.
///
/// Display only: nothing in the verdict depends on trace content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Zero-based position of the step in the planner's sequence.
    pub step: u64,
    /// The tool name as it appeared in the step.
    pub tool: String,
    pub input: String,
    pub observation: String,
    /// Derived detail lines (parsed URLs, ingestion, snippet stance, failures).
    pub details: Vec<String>,
    /// Wall-clock time the entry was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl TraceEntry {
    /// Render the entry as human-readable trace lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3 + self.details.len());
        lines.push(format!("→ Tool: {}", self.tool));
        lines.push(format!("   Input: {}", self.input));
        lines.push(format!("   Obs:   {}", self.observation));
        lines.extend(self.details.iter().cloned());
        lines
    }
}

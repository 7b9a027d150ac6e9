//! Claim run identity and lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one claim-verification run.
///
/// Appears in every log line and trace event produced while the claim is
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a single claim run.
///
/// `Created → Processing → Verdicted`, or `Aborted` when a fatal error stops
/// processing. Both `Verdicted` and `Aborted` are terminal; the graph stays
/// queryable in either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Created,
    Processing,
    Verdicted,
    Aborted,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Verdicted | RunState::Aborted)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Created => "created",
            RunState::Processing => "processing",
            RunState::Verdicted => "verdicted",
            RunState::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

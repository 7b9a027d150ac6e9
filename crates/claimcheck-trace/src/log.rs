//! The collected trace of one claim run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use claimcheck_contracts::step::TraceEntry;

/// Every entry written for a run, in step order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceLog {
    pub run_id: String,
    pub entries: Vec<TraceEntry>,

    /// When the runner sealed the trace. `None` if the run aborted first.
    pub finalized_at: Option<DateTime<Utc>>,
}

impl TraceLog {
    /// The human-readable trace: every entry's lines, in step order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().flat_map(|e| e.lines()).collect()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }
}

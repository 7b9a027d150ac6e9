//! In-memory `TraceWriter`.
//!
//! Collects one `TraceEntry` per processed step for a single claim run.
//! Once the runner finalizes the trace, further writes are refused.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    step::TraceEntry,
};
use claimcheck_core::traits::TraceWriter;

use crate::log::TraceLog;

/// An in-memory trace for one claim run.
pub struct InMemoryTraceWriter {
    state: Mutex<TraceLog>,
}

impl InMemoryTraceWriter {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(TraceLog {
                run_id: run_id.into(),
                entries: Vec::new(),
                finalized_at: None,
            }),
        }
    }

    // Entries are only ever appended, so a poisoned lock still holds a
    // usable prefix of the trace.
    fn state(&self) -> MutexGuard<'_, TraceLog> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn run_id(&self) -> String {
        self.state().run_id.clone()
    }

    /// Entries written so far, in step order.
    pub fn entries(&self) -> Vec<TraceEntry> {
        self.state().entries.clone()
    }

    /// The human-readable trace written so far.
    pub fn lines(&self) -> Vec<String> {
        self.state().lines()
    }

    pub fn is_finalized(&self) -> bool {
        self.state().is_finalized()
    }

    /// A copy of the trace as it stands.
    pub fn export_log(&self) -> TraceLog {
        self.state().clone()
    }
}

impl TraceWriter for InMemoryTraceWriter {
    /// Append one entry. Refused once the trace is finalized.
    fn write(&self, entry: &TraceEntry) -> ClaimCheckResult<()> {
        let mut state = self.state();

        if state.is_finalized() {
            return Err(ClaimCheckError::TraceWriteFailed {
                reason: format!("trace for run '{}' is already finalized", state.run_id),
            });
        }

        debug!(run_id = %state.run_id, step = entry.step, tool = %entry.tool, "trace entry recorded");
        state.entries.push(entry.clone());
        Ok(())
    }

    /// Seal the trace of `run_id`.
    ///
    /// Fails if this writer belongs to another run or was already sealed.
    fn finalize(&self, run_id: &str) -> ClaimCheckResult<()> {
        let mut state = self.state();

        if state.run_id != run_id {
            return Err(ClaimCheckError::TraceWriteFailed {
                reason: format!(
                    "trace belongs to run '{}', not '{}'",
                    state.run_id, run_id
                ),
            });
        }
        if state.is_finalized() {
            return Err(ClaimCheckError::TraceWriteFailed {
                reason: format!("trace for run '{}' is already finalized", run_id),
            });
        }

        state.finalized_at = Some(Utc::now());
        info!(run_id = %run_id, entry_count = state.entries.len(), "trace finalized");
        Ok(())
    }
}

//! Seam traits for the claimcheck engine.
//!
//! - `ClassificationDecoder`: turns a classify-tool observation into a
//!   typed `Classification` (implemented by `claimcheck-verify`)
//! - `TraceWriter`: records one `TraceEntry` per processed step
//!   (implemented by `claimcheck-trace`)
//! - `StepSource`: the external planner, seen only as an ordered
//!   step sequence per claim (implemented by `claimcheck-replay`)
//!
//! The engine never performs I/O itself; everything outside the graph comes
//! in through these traits.

use claimcheck_contracts::{
    error::ClaimCheckResult,
    step::{Classification, RawStep, TraceEntry},
};

/// Decodes the raw text of a classify-tool observation.
pub trait ClassificationDecoder: Send + Sync {
    /// Decode `observation` into a classification.
    ///
    /// Must return `ClaimCheckError::MalformedClassification` when the payload
    /// cannot be parsed or lacks a required field. Never panics on bad input.
    fn decode(&self, observation: &str) -> ClaimCheckResult<Classification>;
}

/// Append-only sink for the human-readable processing trace.
///
/// Every processed step produces exactly one entry, including steps whose
/// classification was rejected. A failed write aborts the claim's run.
pub trait TraceWriter: Send + Sync {
    /// Append one entry to the trace.
    fn write(&self, entry: &TraceEntry) -> ClaimCheckResult<()>;

    /// Mark the run as finished. Called once, after the verdict.
    fn finalize(&self, run_id: &str) -> ClaimCheckResult<()>;
}

/// Supplies the planner's ordered step sequence for a claim.
pub trait StepSource {
    /// Return every step recorded for `claim`, in the order the planner emitted them.
    fn steps_for(&self, claim: &str) -> ClaimCheckResult<Vec<RawStep>>;

    /// The planner's own final answer for `claim`, if one was recorded.
    fn final_answer(&self, _claim: &str) -> Option<String> {
        None
    }
}

//! Error types for the claimcheck pipeline.
//!
//! All fallible operations return `ClaimCheckResult<T>`. Variants carry enough
//! context to be written into a claim's trace and report.

use thiserror::Error;

use crate::graph::NodeId;

/// The unified error type for claimcheck.
#[derive(Debug, Error)]
pub enum ClaimCheckError {
    /// An edge referenced a node that does not exist in the graph.
    ///
    /// Signals a broken sequencing invariant; the claim's run is aborted.
    #[error("unknown node '{node_id}' referenced by edge")]
    UnknownNode { node_id: NodeId },

    /// A classify-tool observation could not be decoded into a classification.
    ///
    /// Only the offending step is dropped; later steps still run.
    #[error("malformed classification: {reason}")]
    MalformedClassification { reason: String },

    /// The trace sink could not record a step.
    #[error("trace write failed: {reason}")]
    TraceWriteFailed { reason: String },

    /// A claim run was driven through an illegal state transition.
    #[error("state machine error: {reason}")]
    StateMachine { reason: String },

    /// A configuration value or file is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// A recorded step sequence could not be loaded or does not cover a claim.
    #[error("fixture error: {reason}")]
    Fixture { reason: String },

    /// A claim report could not be serialized or written.
    #[error("report error: {reason}")]
    Report { reason: String },
}

impl ClaimCheckError {
    /// True for errors that only invalidate the step that raised them.
    pub fn is_step_local(&self) -> bool {
        matches!(self, ClaimCheckError::MalformedClassification { .. })
    }
}

/// Convenience alias used throughout the claimcheck crates.
pub type ClaimCheckResult<T> = Result<T, ClaimCheckError>;

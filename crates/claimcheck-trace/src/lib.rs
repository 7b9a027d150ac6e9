//! # claimcheck-trace
//!
//! The processing trace of a claim run, and the digest that binds it to the
//! run's evidence.
//!
//! [`InMemoryTraceWriter`] collects one entry per processed step. The trace
//! is for display; the verdict never depends on it. [`evidence_digest`]
//! fingerprints a finished run's graph snapshot, verdict and trace lines so
//! a persisted report can later be checked for edits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimcheck_trace::{evidence_digest, InMemoryTraceWriter};
//!
//! let trace = InMemoryTraceWriter::new(run_id.to_string());
//! let run = runner.run(run_id, claim, &steps, &trace);
//!
//! let digest = evidence_digest(
//!     &run.run_id().to_string(),
//!     &run.graph().snapshot(),
//!     run.verdict(),
//!     &trace.lines(),
//! );
//! ```

pub mod digest;
pub mod log;
pub mod memory;

pub use digest::{digest_matches, evidence_digest};
pub use log::TraceLog;
pub use memory::InMemoryTraceWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────

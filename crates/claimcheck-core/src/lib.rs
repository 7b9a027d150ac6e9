//! # claimcheck-core
//!
//! The evidence-aggregation and verdict engine.
//!
//! This crate provides:
//! - `EvidenceGraph`: append-only claim/document/snippet graph
//! - `StepProcessor`: applies one planner step to a claim's graph
//! - `aggregate`: the pure verdict rule over support/refute scores
//! - `ClaimRunner`: the per-claim lifecycle and query surface
//! - the seam traits (`ClassificationDecoder`, `TraceWriter`, `StepSource`)
//!
//! The engine is synchronous and performs no I/O.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimcheck_core::{ClaimRunner, StepProcessor};
//!
//! let runner = ClaimRunner::new(StepProcessor::new(Box::new(decoder)));
//! let run = runner.run(RunId::new(), "The Eiffel Tower is painted every 7 years", &steps, &trace);
//! println!("{}", run.verdict().unwrap());
//! ```

pub mod graph;
pub mod processor;
pub mod runner;
pub mod traits;
pub mod verdict;

pub use graph::{EvidenceGraph, GraphSnapshot, DEFAULT_TOP_K};
pub use processor::{extract_urls, StepProcessor, DEFAULT_MAX_URLS};
pub use runner::{ClaimRun, ClaimRunner};
pub use verdict::{aggregate, aggregate_board};

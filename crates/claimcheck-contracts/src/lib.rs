//! # claimcheck-contracts
//!
//! Shared types and error contracts for the claimcheck evidence engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, small conversions, and error types.

pub mod error;
pub mod graph;
pub mod run;
pub mod step;
pub mod verdict;

//! # claimcheck-replay
//!
//! Drives the claimcheck engine from recorded planner runs.
//!
//! 1. [`parse_claims`] splits raw user input into claims.
//! 2. [`FixtureStepSource`] serves each claim's recorded steps from a JSON
//!    fixture, in place of a live planner.
//! 3. [`verify_claims`] runs every claim in order, each with its own graph
//!    and trace, and returns one [`ClaimReport`] per claim.
//! 4. [`write_reports`] and [`read_reports`] persist reports with their
//!    evidence graph and evidence digest.
//!
//! No external calls are made; everything a claim needs is in the fixture.

pub mod batch;
pub mod claims;
pub mod fixture;
pub mod report;

pub use batch::{build_runner, verify_claim, verify_claims};
pub use claims::parse_claims;
pub use fixture::{FixtureStepSource, RecordedRun, StepFixture};
pub use report::{read_reports, write_reports, ClaimReport};

//! Recorded planner runs, replayed as step sources.
//!
//! A fixture file holds one entry per claim:
//!
//! ```json
//! {
//!   "runs": [
//!     {
//!       "claim": "The Eiffel Tower is painted every 7 years",
//!       "final_answer": "Yes, roughly every seven years.",
//!       "steps": [
//!         { "tool_name": "web_search", "tool_input": "...", "observation": "http://a\nhttp://b" },
//!         { "tool_name": "document_fetcher", "tool_input": "http://a", "observation": "..." }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    step::RawStep,
};
use claimcheck_core::traits::StepSource;

/// One recorded planner run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRun {
    pub claim: String,

    /// The planner's own closing answer, when it produced one.
    #[serde(default)]
    pub final_answer: Option<String>,

    #[serde(default)]
    pub steps: Vec<RawStep>,
}

/// The on-disk fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFixture {
    #[serde(default)]
    pub runs: Vec<RecordedRun>,
}

/// A `StepSource` that replays recorded runs.
#[derive(Debug, Clone, Default)]
pub struct FixtureStepSource {
    fixture: StepFixture,
}

impl FixtureStepSource {
    pub fn new(fixture: StepFixture) -> Self {
        Self { fixture }
    }

    /// Parse a fixture document.
    ///
    /// Returns `ClaimCheckError::Fixture` if the JSON is malformed or does
    /// not match `StepFixture`.
    pub fn from_json_str(s: &str) -> ClaimCheckResult<Self> {
        let fixture: StepFixture = serde_json::from_str(s).map_err(|e| ClaimCheckError::Fixture {
            reason: format!("failed to parse step fixture: {}", e),
        })?;
        debug!(runs = fixture.runs.len(), "step fixture loaded");
        Ok(Self::new(fixture))
    }

    pub fn from_file(path: &Path) -> ClaimCheckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClaimCheckError::Fixture {
            reason: format!("failed to read step fixture '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    /// Claims recorded in the fixture, in file order.
    pub fn claims(&self) -> Vec<String> {
        self.fixture.runs.iter().map(|r| r.claim.clone()).collect()
    }

    /// Find the recorded run for `claim`: exact text first, then trimmed.
    fn lookup(&self, claim: &str) -> Option<&RecordedRun> {
        self.fixture
            .runs
            .iter()
            .find(|r| r.claim == claim)
            .or_else(|| {
                let wanted = claim.trim();
                self.fixture.runs.iter().find(|r| r.claim.trim() == wanted)
            })
    }
}

impl StepSource for FixtureStepSource {
    fn steps_for(&self, claim: &str) -> ClaimCheckResult<Vec<RawStep>> {
        self.lookup(claim)
            .map(|r| r.steps.clone())
            .ok_or_else(|| ClaimCheckError::Fixture {
                reason: format!("no recorded steps for claim '{}'", claim),
            })
    }

    fn final_answer(&self, claim: &str) -> Option<String> {
        self.lookup(claim).and_then(|r| r.final_answer.clone())
    }
}

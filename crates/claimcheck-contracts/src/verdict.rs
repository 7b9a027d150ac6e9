//! Score accumulation and verdict types.
//!
//! A `ScoreBoard` collects the scores of linked snippets while a claim's steps
//! are processed. The aggregator in `claimcheck-core` turns it into a
//! `Verdict` once, after the last step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Stance;

/// Running score collections for one claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub supports: Vec<f64>,
    pub refutes: Vec<f64>,
}

impl ScoreBoard {
    /// Record `score` under `stance`. Neutral scores are not collected.
    pub fn record(&mut self, stance: Stance, score: f64) {
        match stance {
            Stance::Supports => self.supports.push(score),
            Stance::Refutes => self.refutes.push(score),
            Stance::Neutral => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty() && self.refutes.is_empty()
    }
}

/// The final call on a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    Supported,
    Refuted,
    Inconclusive,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerdictLabel::Supported => "Supported",
            VerdictLabel::Refuted => "Refuted",
            VerdictLabel::Inconclusive => "Inconclusive",
        };
        f.write_str(s)
    }
}

/// A verdict with its confidence and the evidence sizes behind it.
///
/// `support_count` and `refute_count` let callers tell "no evidence" apart
/// from "perfectly balanced evidence": both yield `Inconclusive`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub confidence: f64,
    pub avg_support: f64,
    pub avg_refute: f64,
    pub support_count: usize,
    pub refute_count: usize,
}

impl Verdict {
    /// True when no linked snippet contributed a score.
    pub fn has_no_evidence(&self) -> bool {
        self.support_count == 0 && self.refute_count == 0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (confidence {:.2})", self.label, self.confidence)
    }
}

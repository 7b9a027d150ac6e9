//! Per-claim reports.
//!
//! A `ClaimReport` is the persisted record of one claim's verification: the
//! verdict, the evidence graph it was drawn from, the trace, and an evidence
//! digest over all three. It also keeps the finished `ClaimRun` so callers
//! can keep querying the graph after the batch is done; that part is not
//! serialized.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    graph::{GraphStats, RankedSnippet},
    run::{RunId, RunState},
    step::StepFailure,
    verdict::Verdict,
};
use claimcheck_core::{ClaimRun, GraphSnapshot};
use claimcheck_trace::{digest_matches, evidence_digest, InMemoryTraceWriter};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claim: String,
    pub run_id: RunId,

    /// The planner's closing answer, if the step source recorded one.
    pub final_answer: Option<String>,

    /// `None` when the run aborted before a verdict.
    pub verdict: Option<Verdict>,
    pub state: RunState,
    pub stats: GraphStats,

    /// Cited document URLs in citation order.
    pub documents: Vec<String>,
    pub top_supporting: Vec<RankedSnippet>,
    pub top_refuting: Vec<RankedSnippet>,

    pub step_failures: Vec<StepFailure>,
    pub abort_reason: Option<String>,

    /// Human-readable processing trace.
    pub trace: Vec<String>,

    /// The evidence graph as it stood when the run ended. `None` when the
    /// claim never ran.
    pub graph: Option<GraphSnapshot>,

    /// SHA-256 over run id, graph, verdict and trace. Empty when the claim
    /// never ran.
    pub evidence_digest: String,

    #[serde(skip)]
    run: Option<ClaimRun>,
}

impl ClaimReport {
    /// Summarize a finished run. `top_k` bounds both snippet lists.
    pub fn from_run(
        run: ClaimRun,
        final_answer: Option<String>,
        trace: &InMemoryTraceWriter,
        top_k: usize,
    ) -> Self {
        let run_id = run.run_id().clone();
        let graph = run.graph().snapshot();
        let trace = trace.lines();
        let evidence_digest = evidence_digest(&run_id.to_string(), &graph, run.verdict(), &trace);

        Self {
            claim: run.claim().to_string(),
            run_id,
            final_answer,
            verdict: run.verdict().cloned(),
            state: run.state(),
            stats: run.stats(),
            documents: run.list_documents(),
            top_supporting: run.list_supporting(top_k),
            top_refuting: run.list_refuting(top_k),
            step_failures: run.step_failures().to_vec(),
            abort_reason: run.abort_reason().map(str::to_string),
            trace,
            graph: Some(graph),
            evidence_digest,
            run: Some(run),
        }
    }

    /// A claim that could not be run at all, e.g. because no steps were
    /// recorded for it.
    pub fn failed(claim: impl Into<String>, run_id: RunId, reason: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            run_id,
            final_answer: None,
            verdict: None,
            state: RunState::Aborted,
            stats: GraphStats::default(),
            documents: Vec::new(),
            top_supporting: Vec::new(),
            top_refuting: Vec::new(),
            step_failures: Vec::new(),
            abort_reason: Some(reason.into()),
            trace: Vec::new(),
            graph: None,
            evidence_digest: String::new(),
            run: None,
        }
    }

    /// The finished run, for further queries. `None` for `failed` reports
    /// and for reports read back from disk.
    pub fn run(&self) -> Option<&ClaimRun> {
        self.run.as_ref()
    }

    /// Recompute the evidence digest and compare it with the stored one.
    ///
    /// A report without a graph matches only if its digest is empty.
    pub fn digest_matches(&self) -> bool {
        match &self.graph {
            Some(graph) => digest_matches(
                &self.run_id.to_string(),
                graph,
                self.verdict.as_ref(),
                &self.trace,
                &self.evidence_digest,
            ),
            None => self.evidence_digest.is_empty(),
        }
    }
}

/// Write `reports` to `path` as pretty-printed JSON.
pub fn write_reports(path: &Path, reports: &[ClaimReport]) -> ClaimCheckResult<()> {
    let json = serde_json::to_string_pretty(reports).map_err(|e| ClaimCheckError::Report {
        reason: format!("failed to serialize reports: {}", e),
    })?;
    std::fs::write(path, json).map_err(|e| ClaimCheckError::Report {
        reason: format!("failed to write reports to '{}': {}", path.display(), e),
    })?;

    info!(path = %path.display(), count = reports.len(), "reports written");
    Ok(())
}

/// Read reports written by [`write_reports`]. The returned reports carry no
/// live run.
pub fn read_reports(path: &Path) -> ClaimCheckResult<Vec<ClaimReport>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ClaimCheckError::Report {
        reason: format!("failed to read reports from '{}': {}", path.display(), e),
    })?;
    let reports: Vec<ClaimReport> =
        serde_json::from_str(&contents).map_err(|e| ClaimCheckError::Report {
            reason: format!("failed to parse reports in '{}': {}", path.display(), e),
        })?;

    for report in reports.iter().filter(|r| !r.digest_matches()) {
        warn!(run_id = %report.run_id, claim = %report.claim, "evidence digest mismatch");
    }
    Ok(reports)
}

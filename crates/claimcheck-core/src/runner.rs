//! The claim runner: drives one claim from creation to verdict.
//!
//! Per claim the runner enforces the lifecycle:
//!
//!   Created → Processing → Verdicted        (or Aborted on a fatal error)
//!
//! Steps are processed strictly in the order supplied; none are reordered,
//! deduplicated, or skipped. The verdict is computed exactly once, after the
//! last step. A malformed classification drops only its own step. Any other
//! error aborts the claim, but whatever evidence was ingested before it stays
//! queryable.

use tracing::{debug, info, warn};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    graph::{GraphStats, NodeId, RankedSnippet, Relation},
    run::{RunId, RunState},
    step::{Step, StepFailure},
    verdict::{ScoreBoard, Verdict},
};

use crate::{
    graph::EvidenceGraph,
    processor::StepProcessor,
    traits::TraceWriter,
    verdict::aggregate_board,
};

/// The state of one claim's verification.
///
/// Owns its graph and score board exclusively; nothing is shared between
/// claims. Query methods are read-only and may be called in any state.
#[derive(Debug)]
pub struct ClaimRun {
    run_id: RunId,
    claim: String,
    claim_id: NodeId,
    graph: EvidenceGraph,
    scores: ScoreBoard,
    state: RunState,
    next_step: u64,
    verdict: Option<Verdict>,
    step_failures: Vec<StepFailure>,
    abort_reason: Option<String>,
}

impl ClaimRun {
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn claim(&self) -> &str {
        &self.claim
    }

    pub fn claim_id(&self) -> NodeId {
        self.claim_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn graph(&self) -> &EvidenceGraph {
        &self.graph
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// The verdict, once the run reached `Verdicted`.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Steps whose contribution was dropped (malformed classifications).
    pub fn step_failures(&self) -> &[StepFailure] {
        &self.step_failures
    }

    /// Why the run was aborted, if it was.
    pub fn abort_reason(&self) -> Option<&str> {
        self.abort_reason.as_deref()
    }

    /// URLs of every cited document, in citation order.
    pub fn list_documents(&self) -> Vec<String> {
        self.graph.cited_urls(self.claim_id)
    }

    /// The `k` strongest supporting snippets.
    pub fn list_supporting(&self, k: usize) -> Vec<RankedSnippet> {
        self.graph.top_snippets(self.claim_id, Relation::Supports, k)
    }

    /// The `k` strongest refuting snippets.
    pub fn list_refuting(&self, k: usize) -> Vec<RankedSnippet> {
        self.graph.top_snippets(self.claim_id, Relation::Refutes, k)
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    /// A `k` large enough to list every snippet of the graph.
    pub fn all(&self) -> usize {
        self.graph.node_count()
    }

    fn abort(&mut self, error: &ClaimCheckError) {
        warn!(run_id = %self.run_id, error = %error, "claim run aborted");
        self.state = RunState::Aborted;
        self.abort_reason = Some(error.to_string());
    }
}

/// Drives claims through the step processor and verdict aggregator.
///
/// One runner can serve any number of claims, one after another; every
/// claim gets a fresh `ClaimRun`.
pub struct ClaimRunner {
    processor: StepProcessor,
}

impl ClaimRunner {
    pub fn new(processor: StepProcessor) -> Self {
        Self { processor }
    }

    /// Create the run for `claim`: a fresh graph holding only the claim node.
    pub fn start(&self, run_id: RunId, claim: impl Into<String>) -> ClaimRun {
        let claim = claim.into();
        let mut graph = EvidenceGraph::new();
        let claim_id = graph.add_claim(claim.as_str());

        info!(run_id = %run_id, claim_id = %claim_id, "claim run created");

        ClaimRun {
            run_id,
            claim,
            claim_id,
            graph,
            scores: ScoreBoard::default(),
            state: RunState::Created,
            next_step: 0,
            verdict: None,
            step_failures: Vec::new(),
            abort_reason: None,
        }
    }

    /// Process the next step of `run`.
    ///
    /// # Errors
    ///
    /// - `StateMachine` if the run is already terminal (the run is unchanged).
    /// - Any fatal step or trace error; the run is then `Aborted`.
    ///
    /// A malformed classification is NOT an error here: it is recorded in
    /// `step_failures` and the run keeps processing.
    pub fn advance(
        &self,
        run: &mut ClaimRun,
        step: &Step,
        trace: &dyn TraceWriter,
    ) -> ClaimCheckResult<()> {
        if run.state.is_terminal() {
            return Err(ClaimCheckError::StateMachine {
                reason: format!("cannot process a step in state '{}'", run.state),
            });
        }
        run.state = RunState::Processing;

        let index = run.next_step;
        run.next_step += 1;

        let processed =
            self.processor
                .process(index, run.claim_id, step, &mut run.graph, &mut run.scores);

        if let Err(e) = trace.write(&processed.entry) {
            run.abort(&e);
            return Err(e);
        }

        match processed.outcome {
            Ok(outcome) => {
                debug!(run_id = %run.run_id, step = index, ?outcome, "step applied");
                Ok(())
            }
            Err(e) if e.is_step_local() => {
                run.step_failures.push(StepFailure {
                    step: index,
                    tool: step.tool.name().to_string(),
                    reason: e.to_string(),
                });
                Ok(())
            }
            Err(e) => {
                run.abort(&e);
                Err(e)
            }
        }
    }

    /// Compute the verdict and seal the trace.
    ///
    /// # Errors
    ///
    /// `StateMachine` if the run is already terminal; a trace finalize failure
    /// aborts the run.
    pub fn conclude<'r>(
        &self,
        run: &'r mut ClaimRun,
        trace: &dyn TraceWriter,
    ) -> ClaimCheckResult<&'r Verdict> {
        if run.state.is_terminal() {
            return Err(ClaimCheckError::StateMachine {
                reason: format!("cannot compute a verdict in state '{}'", run.state),
            });
        }

        if let Err(e) = trace.finalize(&run.run_id.to_string()) {
            run.abort(&e);
            return Err(e);
        }

        let verdict = aggregate_board(&run.scores);
        info!(
            run_id = %run.run_id,
            verdict = %verdict.label,
            confidence = verdict.confidence,
            support_count = verdict.support_count,
            refute_count = verdict.refute_count,
            "claim verdicted"
        );

        run.state = RunState::Verdicted;
        let verdict: &Verdict = run.verdict.insert(verdict);
        Ok(verdict)
    }

    /// Run `claim` over every step in `steps`, then verdict it.
    ///
    /// Never fails: a fatal error leaves the returned run `Aborted` with its
    /// partial graph and `abort_reason` set.
    pub fn run(
        &self,
        run_id: RunId,
        claim: impl Into<String>,
        steps: &[Step],
        trace: &dyn TraceWriter,
    ) -> ClaimRun {
        let mut run = self.start(run_id, claim);

        for step in steps {
            if self.advance(&mut run, step, trace).is_err() {
                return run;
            }
        }

        // Errors here have already moved the run to Aborted.
        let _ = self.conclude(&mut run, trace);
        run
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

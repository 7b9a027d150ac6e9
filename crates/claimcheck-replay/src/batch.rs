//! Sequential batch verification.
//!
//! Claims are verified strictly one after another. Each gets its own run id,
//! runner, evidence graph and trace writer, so a failure in one claim never
//! reaches the next.

use tracing::{info, warn};

use claimcheck_config::RunConfig;
use claimcheck_contracts::run::RunId;
use claimcheck_core::{traits::StepSource, ClaimRunner, StepProcessor};
use claimcheck_trace::InMemoryTraceWriter;
use claimcheck_verify::SchemaClassificationDecoder;

use crate::report::ClaimReport;

/// Build a runner wired with the schema decoder and the configured URL cap.
pub fn build_runner(config: &RunConfig) -> ClaimRunner {
    let processor = StepProcessor::new(Box::new(SchemaClassificationDecoder::new()))
        .with_max_urls(config.search.max_urls);
    ClaimRunner::new(processor)
}

/// Verify a single claim against the steps `source` recorded for it.
pub fn verify_claim(claim: &str, source: &dyn StepSource, config: &RunConfig) -> ClaimReport {
    let run_id = RunId::new();

    let raw_steps = match source.steps_for(claim) {
        Ok(steps) => steps,
        Err(e) => {
            warn!(run_id = %run_id, claim = %claim, error = %e, "claim skipped");
            return ClaimReport::failed(claim, run_id, e.to_string());
        }
    };

    let steps: Vec<_> = raw_steps.iter().map(|raw| config.resolve_step(raw)).collect();
    let trace = InMemoryTraceWriter::new(run_id.to_string());
    let runner = build_runner(config);

    let run = runner.run(run_id, claim, &steps, &trace);

    match run.verdict() {
        Some(verdict) => info!(
            run_id = %run.run_id(),
            claim = %claim,
            verdict = %verdict,
            step_failures = run.step_failures().len(),
            "claim report ready"
        ),
        None => warn!(
            run_id = %run.run_id(),
            claim = %claim,
            reason = run.abort_reason().unwrap_or("unknown"),
            "claim aborted"
        ),
    }

    ClaimReport::from_run(run, source.final_answer(claim), &trace, config.query.top_k)
}

/// Verify every claim in order, one report per claim.
pub fn verify_claims(
    claims: &[String],
    source: &dyn StepSource,
    config: &RunConfig,
) -> Vec<ClaimReport> {
    claims
        .iter()
        .map(|claim| verify_claim(claim, source, config))
        .collect()
}

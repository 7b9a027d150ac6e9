//! Plain-text rendering of claim reports.

use claimcheck_contracts::graph::RankedSnippet;
use claimcheck_replay::ClaimReport;

/// `• (0.80) summary`
pub fn snippet_line(snippet: &RankedSnippet) -> String {
    format!("• ({:.2}) {}", snippet.score, snippet.summary)
}

/// The per-claim summary printed after a batch.
pub fn report_lines(report: &ClaimReport, show_trace: bool) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Claim: {}", report.claim),
        "-".repeat(report.claim.chars().count() + 7),
    ];

    if let Some(answer) = &report.final_answer {
        lines.push(format!("Final answer: {}", answer));
    }

    match &report.verdict {
        Some(verdict) => lines.push(format!("Verdict: {}", verdict)),
        None => lines.push("Verdict: none".to_string()),
    }
    lines.push(format!("Graph stats: {}", report.stats));

    lines.push("Top supporting snippets:".to_string());
    push_snippets(&mut lines, &report.top_supporting);
    lines.push("Top refuting snippets:".to_string());
    push_snippets(&mut lines, &report.top_refuting);

    if !report.step_failures.is_empty() {
        lines.push(format!("Skipped steps ({}):", report.step_failures.len()));
        for failure in &report.step_failures {
            lines.push(format!(
                "  step {} ({}): {}",
                failure.step, failure.tool, failure.reason
            ));
        }
    }

    if let Some(reason) = &report.abort_reason {
        lines.push(format!("Aborted: {}", reason));
    }

    if show_trace {
        lines.push("=== Trace ===".to_string());
        if report.trace.is_empty() {
            lines.push("(no steps)".to_string());
        }
        lines.extend(report.trace.iter().cloned());
    }

    if !report.evidence_digest.is_empty() {
        lines.push(format!("Evidence digest: {}", report.evidence_digest));
    }

    lines
}

/// One `ok` / `MISMATCH` line per report, as printed by `claimcheck check`.
pub fn check_lines(reports: &[ClaimReport]) -> Vec<String> {
    reports
        .iter()
        .map(|report| {
            let status = if report.digest_matches() { "ok" } else { "MISMATCH" };
            format!("{:<8} {} {}", status, report.run_id, report.claim)
        })
        .collect()
}

fn push_snippets(lines: &mut Vec<String>, snippets: &[RankedSnippet]) {
    if snippets.is_empty() {
        lines.push("  (none)".to_string());
    }
    for snippet in snippets {
        lines.push(format!("  {}", snippet_line(snippet)));
    }
}

//! Evidence digests.
//!
//! An evidence digest is a SHA-256 fingerprint over everything a report
//! persists about one claim's evidence: the run id, the graph snapshot, the
//! verdict and the trace lines. Recomputing it over a report read back from
//! disk shows whether any of those were edited after the run.
//!
//! Hash input, in order:
//!   1. the tag `claimcheck/evidence/v1`
//!   2. the run id
//!   3. the node count (u64 LE), then each node as canonical JSON
//!   4. the edge count (u64 LE), then each edge as canonical JSON
//!   5. the verdict as canonical JSON (`null` when there is none)
//!   6. the line count (u64 LE), then each trace line
//!
//! Every variable-length field is prefixed with its byte length (u64 LE), so
//! moving text across a field boundary changes the digest.

use serde::Serialize;
use sha2::{Digest, Sha256};

use claimcheck_contracts::verdict::Verdict;
use claimcheck_core::GraphSnapshot;

const DIGEST_TAG: &[u8] = b"claimcheck/evidence/v1";

/// Compute the evidence digest as 64 lowercase hex characters.
///
/// # Panics
///
/// Panics if a node, edge or verdict fails to serialize, which cannot
/// happen for these plain data types.
pub fn evidence_digest(
    run_id: &str,
    graph: &GraphSnapshot,
    verdict: Option<&Verdict>,
    trace_lines: &[String],
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(DIGEST_TAG);
    field(&mut hasher, run_id.as_bytes());

    hasher.update((graph.nodes.len() as u64).to_le_bytes());
    for node in &graph.nodes {
        field(&mut hasher, &canonical(node));
    }

    hasher.update((graph.edges.len() as u64).to_le_bytes());
    for edge in &graph.edges {
        field(&mut hasher, &canonical(edge));
    }

    field(&mut hasher, &canonical(&verdict));

    hasher.update((trace_lines.len() as u64).to_le_bytes());
    for line in trace_lines {
        field(&mut hasher, line.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// True when `expected` is the digest of the given evidence.
pub fn digest_matches(
    run_id: &str,
    graph: &GraphSnapshot,
    verdict: Option<&Verdict>,
    trace_lines: &[String],
    expected: &str,
) -> bool {
    evidence_digest(run_id, graph, verdict, trace_lines) == expected
}

fn field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

fn canonical<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("graph and verdict types always serialize to JSON")
}

//! Step processing: one planner step in, graph mutations and a trace entry out.
//!
//! The processor interprets a step by its tool kind:
//!
//!   Search   → parse URLs (trace only)
//!   Fetch    → non-empty text becomes a document node + `cites` edge
//!   Classify → decoded record becomes a snippet node; linked stances add an
//!              edge and a score
//!   Other    → ignored
//!
//! It never decides control flow. The runner feeds it steps in order and
//! decides what an error means for the claim.

use chrono::Utc;
use tracing::{debug, info, warn};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    graph::{NodeId, Relation},
    step::{Step, StepOutcome, ToolKind, TraceEntry},
    verdict::ScoreBoard,
};

use crate::{graph::EvidenceGraph, traits::ClassificationDecoder};

/// Maximum number of URLs taken from one search observation.
pub const DEFAULT_MAX_URLS: usize = 4;

/// Extract URLs from a search observation.
///
/// Each line is trimmed; lines starting with `http` are URLs, everything else
/// is ignored. At most `max_urls` are returned, in observation order.
pub fn extract_urls(observation: &str, max_urls: usize) -> Vec<String> {
    observation
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http"))
        .take(max_urls)
        .map(str::to_string)
        .collect()
}

/// The result of processing one step.
///
/// `entry` is always produced, even when `outcome` is an error, so that a
/// rejected step still shows up in the trace.
#[derive(Debug)]
pub struct Processed {
    pub entry: TraceEntry,
    pub outcome: ClaimCheckResult<StepOutcome>,
}

/// Translates planner steps into evidence-graph mutations.
pub struct StepProcessor {
    decoder: Box<dyn ClassificationDecoder>,
    max_urls: usize,
}

impl StepProcessor {
    /// Create a processor that decodes classifications with `decoder`.
    pub fn new(decoder: Box<dyn ClassificationDecoder>) -> Self {
        Self {
            decoder,
            max_urls: DEFAULT_MAX_URLS,
        }
    }

    /// Override how many URLs are kept from each search observation.
    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    pub fn max_urls(&self) -> usize {
        self.max_urls
    }

    /// Process step number `index` of `claim`'s sequence.
    ///
    /// On `MalformedClassification` the graph and score board are left exactly
    /// as they were. `UnknownNode` is passed through for the runner to treat
    /// as fatal.
    pub fn process(
        &self,
        index: u64,
        claim: NodeId,
        step: &Step,
        graph: &mut EvidenceGraph,
        scores: &mut ScoreBoard,
    ) -> Processed {
        debug!(step = index, tool = %step.tool.name(), "processing step");

        let mut details = Vec::new();
        let outcome = match &step.tool {
            ToolKind::Search => Ok(self.search(step, &mut details)),
            ToolKind::Fetch => self.fetch(claim, step, graph, &mut details),
            ToolKind::Classify => self.classify(claim, step, graph, scores, &mut details),
            ToolKind::Other(name) => {
                debug!(step = index, tool = %name, "unrecognized tool ignored");
                details.push("   Unrecognized tool; ignored".to_string());
                Ok(StepOutcome::Ignored { tool: name.clone() })
            }
        };

        if let Err(e) = &outcome {
            warn!(step = index, tool = %step.tool.name(), error = %e, "step failed");
            details.push(format!("   ✗ {}", e));
        }

        let entry = TraceEntry {
            step: index,
            tool: step.tool.name().to_string(),
            input: step.input.clone(),
            observation: step.observation.clone(),
            details,
            timestamp: Utc::now(),
        };

        Processed { entry, outcome }
    }

    fn search(&self, step: &Step, details: &mut Vec<String>) -> StepOutcome {
        let urls = extract_urls(&step.observation, self.max_urls);
        details.push(format!("   Parsed URLs ({}):", urls.len()));
        details.extend(urls.iter().map(|u| format!("     • {}", u)));
        debug!(url_count = urls.len(), "search results parsed");
        StepOutcome::Searched { urls }
    }

    fn fetch(
        &self,
        claim: NodeId,
        step: &Step,
        graph: &mut EvidenceGraph,
        details: &mut Vec<String>,
    ) -> ClaimCheckResult<StepOutcome> {
        let url = step.input.clone();

        if step.observation.trim().is_empty() {
            info!(url = %url, "empty fetch skipped");
            details.push(format!("   Skipped empty fetch for {}", url));
            return Ok(StepOutcome::SkippedEmptyFetch { url });
        }

        ensure_claim(graph, claim)?;
        let document = graph.add_document(url.as_str(), step.observation.as_str());
        graph.add_edge(claim, document, Relation::Cites)?;

        info!(url = %url, document = %document, "document ingested");
        details.push(format!("   Ingested document: {}", url));
        Ok(StepOutcome::Ingested { document, url })
    }

    fn classify(
        &self,
        claim: NodeId,
        step: &Step,
        graph: &mut EvidenceGraph,
        scores: &mut ScoreBoard,
        details: &mut Vec<String>,
    ) -> ClaimCheckResult<StepOutcome> {
        // Decode before touching the graph so a bad payload leaves no trace in it.
        let classification = self.decoder.decode(&step.observation)?;
        let stance = classification.stance();
        let score = classification.score;
        ensure_claim(graph, claim)?;

        let snippet = graph.add_snippet(
            classification.summary,
            classification.label,
            score,
        );

        match stance.relation() {
            Some(relation) => {
                graph.add_edge(claim, snippet, relation)?;
                scores.record(stance, score);
                details.push(format!("   → snippet {} ({:.2})", stance, score));
            }
            None => {
                details.push("   → snippet neutral".to_string());
            }
        }

        info!(snippet = %snippet, %stance, score, "snippet classified");
        Ok(StepOutcome::Classified {
            snippet,
            stance,
            score,
        })
    }
}

/// Fail before any node is created when `claim` is not in the graph.
fn ensure_claim(graph: &EvidenceGraph, claim: NodeId) -> ClaimCheckResult<()> {
    match graph.node(claim) {
        Some(_) => Ok(()),
        None => {
            warn!(node_id = %claim, "step references unknown claim");
            Err(ClaimCheckError::UnknownNode { node_id: claim })
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use claimcheck_contracts::{
        error::{ClaimCheckError, ClaimCheckResult},
        graph::{NodeId, Relation, Stance},
        step::{Classification, Step, StepOutcome, ToolKind},
        verdict::ScoreBoard,
    };

    use crate::{graph::EvidenceGraph, traits::ClassificationDecoder};

    use super::{extract_urls, StepProcessor};

    /// Decodes `summary|label|score`; anything else is malformed.
    struct PipeDecoder;

    impl ClassificationDecoder for PipeDecoder {
        fn decode(&self, observation: &str) -> ClaimCheckResult<Classification> {
            let parts: Vec<&str> = observation.split('|').collect();
            match parts.as_slice() {
                [summary, label, score] => Ok(Classification {
                    summary: summary.to_string(),
                    label: label.to_string(),
                    score: score.parse().map_err(|_| ClaimCheckError::MalformedClassification {
                        reason: "score is not a number".to_string(),
                    })?,
                }),
                _ => Err(ClaimCheckError::MalformedClassification {
                    reason: "expected summary|label|score".to_string(),
                }),
            }
        }
    }

    fn setup() -> (StepProcessor, EvidenceGraph, NodeId, ScoreBoard) {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        (StepProcessor::new(Box::new(PipeDecoder)), graph, claim, ScoreBoard::default())
    }

    // ── URL extraction ───────────────────────────────────────────────────────

    #[test]
    fn extract_urls_keeps_http_lines_only() {
        let urls = extract_urls("  http://a \nnot a url\nhttps://b\n\nftp://c", 4);
        assert_eq!(urls, vec!["http://a", "https://b"]);
    }

    #[test]
    fn extract_urls_caps_at_max() {
        let obs = "http://1\nhttp://2\nhttp://3\nhttp://4\nhttp://5";
        assert_eq!(extract_urls(obs, 4).len(), 4);
        assert_eq!(extract_urls(obs, 4)[3], "http://4");
    }

    // ── Search ───────────────────────────────────────────────────────────────

    #[test]
    fn search_does_not_mutate_graph() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Search, "c", "http://a\nhttp://b");

        let processed = processor.process(0, claim, &step, &mut graph, &mut scores);

        match processed.outcome.unwrap() {
            StepOutcome::Searched { urls } => assert_eq!(urls, vec!["http://a", "http://b"]),
            other => panic!("expected Searched, got {:?}", other),
        }
        assert_eq!(graph.stats().node_count, 1);
        assert_eq!(graph.stats().edge_count, 0);
        assert_eq!(processed.entry.details[0], "   Parsed URLs (2):");
        assert_eq!(processed.entry.details[1], "     • http://a");
    }

    #[test]
    fn search_respects_configured_max_urls() {
        let (processor, mut graph, claim, mut scores) = setup();
        let processor = processor.with_max_urls(1);
        let step = Step::new(ToolKind::Search, "c", "http://a\nhttp://b");

        let processed = processor.process(0, claim, &step, &mut graph, &mut scores);
        assert!(matches!(processed.outcome, Ok(StepOutcome::Searched { urls }) if urls.len() == 1));
    }

    // ── Fetch ────────────────────────────────────────────────────────────────

    #[test]
    fn fetch_ingests_document_and_cites() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Fetch, "http://a", "full article text");

        let processed = processor.process(1, claim, &step, &mut graph, &mut scores);

        assert!(matches!(processed.outcome, Ok(StepOutcome::Ingested { .. })));
        assert_eq!(graph.cited_urls(claim), vec!["http://a"]);
        assert_eq!(graph.edges()[0].relation, Relation::Cites);
        assert_eq!(processed.entry.details, vec!["   Ingested document: http://a"]);
    }

    #[test]
    fn fetch_skips_whitespace_only_text() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Fetch, "http://b", "  \n\t ");

        let processed = processor.process(1, claim, &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Ok(StepOutcome::SkippedEmptyFetch { ref url }) if url == "http://b"
        ));
        assert_eq!(graph.stats().node_count, 1);
        assert_eq!(processed.entry.details, vec!["   Skipped empty fetch for http://b"]);
    }

    // ── Classify ─────────────────────────────────────────────────────────────

    #[test]
    fn classify_supports_links_and_scores() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Classify, "text", "S1|supports|0.8");

        let processed = processor.process(2, claim, &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Ok(StepOutcome::Classified { stance: Stance::Supports, .. })
        ));
        assert_eq!(scores.supports, vec![0.8]);
        assert!(scores.refutes.is_empty());
        assert_eq!(graph.stats().edge_count, 1);
        assert_eq!(graph.edges()[0].relation, Relation::Supports);
        assert_eq!(processed.entry.details, vec!["   → snippet supports (0.80)"]);
    }

    #[test]
    fn classify_refutes_links_and_scores() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Classify, "text", "R1|refutes|0.65");

        processor.process(2, claim, &step, &mut graph, &mut scores);

        assert_eq!(scores.refutes, vec![0.65]);
        assert_eq!(graph.top_snippets(claim, Relation::Refutes, 3)[0].summary, "R1");
    }

    #[test]
    fn classify_neutral_records_unlinked_snippet() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Classify, "text", "N1|unclear|0.9");

        let processed = processor.process(2, claim, &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Ok(StepOutcome::Classified { stance: Stance::Neutral, .. })
        ));
        assert_eq!(graph.stats().node_count, 2);
        assert_eq!(graph.stats().edge_count, 0);
        assert!(scores.is_empty());
        assert_eq!(processed.entry.details, vec!["   → snippet neutral"]);
    }

    #[test]
    fn malformed_classification_leaves_graph_unchanged() {
        let (processor, mut graph, claim, mut scores) = setup();
        let before = graph.stats();
        let step = Step::new(ToolKind::Classify, "text", "not a record");

        let processed = processor.process(2, claim, &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Err(ClaimCheckError::MalformedClassification { .. })
        ));
        assert_eq!(graph.stats(), before);
        assert!(scores.is_empty());
        assert!(processed.entry.details[0].contains("malformed classification"));
    }

    // ── Other tools ──────────────────────────────────────────────────────────

    #[test]
    fn unknown_tool_is_ignored() {
        let (processor, mut graph, claim, mut scores) = setup();
        let step = Step::new(ToolKind::Other("calculator".to_string()), "2+2", "4");

        let processed = processor.process(0, claim, &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Ok(StepOutcome::Ignored { ref tool }) if tool == "calculator"
        ));
        assert_eq!(processed.entry.tool, "calculator");
        assert_eq!(graph.stats().node_count, 1);
    }

    #[test]
    fn fetch_against_missing_claim_is_unknown_node() {
        let (processor, mut graph, _claim, mut scores) = setup();
        let step = Step::new(ToolKind::Fetch, "http://a", "body");

        let processed = processor.process(0, NodeId(77), &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Err(ClaimCheckError::UnknownNode { node_id }) if node_id == NodeId(77)
        ));
        assert_eq!(graph.stats().node_count, 1);
        assert_eq!(graph.stats().edge_count, 0);
    }

    #[test]
    fn classify_against_missing_claim_adds_no_snippet() {
        let (processor, mut graph, _claim, mut scores) = setup();
        let step = Step::new(ToolKind::Classify, "text", "S1|supports|0.8");

        let processed = processor.process(0, NodeId(9), &step, &mut graph, &mut scores);

        assert!(matches!(
            processed.outcome,
            Err(ClaimCheckError::UnknownNode { node_id }) if node_id == NodeId(9)
        ));
        assert_eq!(graph.stats().node_count, 1);
        assert!(scores.is_empty());
    }
}

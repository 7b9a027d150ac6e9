//! The append-only evidence graph.
//!
//! Nodes are issued ids in creation order starting at 1. Edges are appended
//! after both endpoints exist; nothing is ever updated or removed. One graph
//! instance belongs to one claim run.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    graph::{Edge, GraphStats, Node, NodeId, NodeKind, RankedSnippet, Relation},
};

/// Number of snippets returned by default from [`EvidenceGraph::top_snippets`].
pub const DEFAULT_TOP_K: usize = 3;

/// Claim, document, and snippet nodes joined by typed edges.
#[derive(Debug, Clone, Default)]
pub struct EvidenceGraph {
    /// Nodes in creation order; the node at index `i` has id `i + 1`.
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// A serializable copy of a graph, for persisting a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl EvidenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u64 + 1);
        self.nodes.push(Node { id, kind });
        id
    }

    /// Create a claim node.
    pub fn add_claim(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Claim { text: text.into() })
    }

    /// Create a document node. `text` is not validated.
    pub fn add_document(&mut self, url: impl Into<String>, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Document {
            url: url.into(),
            text: text.into(),
        })
    }

    /// Create a snippet node. `score` is stored as given.
    pub fn add_snippet(
        &mut self,
        summary: impl Into<String>,
        label: impl Into<String>,
        score: f64,
    ) -> NodeId {
        self.push(NodeKind::Snippet {
            summary: summary.into(),
            label: label.into(),
            score,
        })
    }

    /// Append an edge from `source` to `target`.
    ///
    /// Fails with `UnknownNode` if either endpoint is absent; the edge list is
    /// left untouched in that case.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        relation: Relation,
    ) -> ClaimCheckResult<()> {
        for id in [source, target] {
            if self.node(id).is_none() {
                warn!(node_id = %id, %relation, "edge references unknown node");
                return Err(ClaimCheckError::UnknownNode { node_id: id });
            }
        }
        debug!(%source, %target, %relation, "edge added");
        self.edges.push(Edge {
            source,
            target,
            relation,
        });
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let index = id.0.checked_sub(1)?;
        self.nodes.get(usize::try_from(index).ok()?)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
        }
    }

    /// Targets of every edge leaving `source` with `relation`, in edge order.
    fn targets(&self, source: NodeId, relation: Relation) -> impl Iterator<Item = &Node> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.source == source && e.relation == relation)
            .filter_map(|e| self.node(e.target))
    }

    /// The highest-scoring snippets linked to `claim` by `relation`.
    ///
    /// Sorted by score, highest first. Equal scores keep edge insertion order
    /// and NaN scores rank last. At most `k` entries are returned; targets
    /// that are not snippets are skipped.
    pub fn top_snippets(&self, claim: NodeId, relation: Relation, k: usize) -> Vec<RankedSnippet> {
        let mut snippets: Vec<RankedSnippet> = self
            .targets(claim, relation)
            .filter_map(|node| match &node.kind {
                NodeKind::Snippet { summary, score, .. } => Some(RankedSnippet {
                    summary: summary.clone(),
                    score: *score,
                }),
                _ => None,
            })
            .collect();

        // sort_by is stable, which keeps ties in edge order.
        snippets.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
        snippets.truncate(k);
        snippets
    }

    /// URLs of every document `claim` cites, in citation order.
    pub fn cited_urls(&self, claim: NodeId) -> Vec<String> {
        self.targets(claim, Relation::Cites)
            .filter_map(|node| match &node.kind {
                NodeKind::Document { url, .. } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

/// Sort key for snippet scores: NaN sorts below every real score.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use claimcheck_contracts::{
        error::ClaimCheckError,
        graph::{NodeId, NodeKind, Relation},
    };

    use super::{EvidenceGraph, DEFAULT_TOP_K};

    fn summaries(graph: &EvidenceGraph, claim: NodeId, relation: Relation, k: usize) -> Vec<String> {
        graph
            .top_snippets(claim, relation, k)
            .into_iter()
            .map(|s| s.summary)
            .collect()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("the sky is blue");
        let doc = graph.add_document("http://a", "body");
        let snippet = graph.add_snippet("S1", "supports", 0.8);

        assert_eq!(claim, NodeId(1));
        assert_eq!(doc, NodeId(2));
        assert_eq!(snippet, NodeId(3));
        assert_eq!(claim.to_string(), "1");
    }

    #[test]
    fn nodes_are_resolvable_by_id() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let doc = graph.add_document("http://a", "body");

        match &graph.node(doc).unwrap().kind {
            NodeKind::Document { url, text } => {
                assert_eq!(url, "http://a");
                assert_eq!(text, "body");
            }
            other => panic!("expected document, got {:?}", other),
        }
        assert!(matches!(graph.node(claim).unwrap().kind, NodeKind::Claim { .. }));
        assert!(graph.node(NodeId(0)).is_none());
        assert!(graph.node(NodeId(3)).is_none());
    }

    #[test]
    fn snippet_score_is_stored_unclamped() {
        let mut graph = EvidenceGraph::new();
        let snippet = graph.add_snippet("S", "supports", 1.7);
        match &graph.node(snippet).unwrap().kind {
            NodeKind::Snippet { score, .. } => assert_eq!(*score, 1.7),
            other => panic!("expected snippet, got {:?}", other),
        }
    }

    #[test]
    fn add_edge_rejects_unknown_nodes_without_mutation() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");

        let err = graph.add_edge(claim, NodeId(99), Relation::Cites).unwrap_err();
        assert!(matches!(err, ClaimCheckError::UnknownNode { node_id } if node_id == NodeId(99)));

        let err = graph.add_edge(NodeId(50), claim, Relation::Cites).unwrap_err();
        assert!(matches!(err, ClaimCheckError::UnknownNode { node_id } if node_id == NodeId(50)));

        assert_eq!(graph.stats().edge_count, 0);
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let doc = graph.add_document("http://a", "body");
        graph.add_edge(claim, doc, Relation::Cites).unwrap();
        graph.add_edge(claim, doc, Relation::Cites).unwrap();

        assert_eq!(graph.stats().edge_count, 2);
        assert_eq!(graph.cited_urls(claim), vec!["http://a", "http://a"]);
    }

    #[test]
    fn stats_counts_nodes_and_edges() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let doc = graph.add_document("http://a", "body");
        graph.add_snippet("neutral", "neutral", 0.4);
        graph.add_edge(claim, doc, Relation::Cites).unwrap();

        let stats = graph.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 1);
    }

    #[test]
    fn top_snippets_sorted_descending_and_truncated() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        for (summary, score) in [("low", 0.2), ("high", 0.9), ("mid", 0.5), ("top", 0.95)] {
            let s = graph.add_snippet(summary, "supports", score);
            graph.add_edge(claim, s, Relation::Supports).unwrap();
        }

        assert_eq!(
            summaries(&graph, claim, Relation::Supports, DEFAULT_TOP_K),
            vec!["top", "high", "mid"]
        );
        assert_eq!(summaries(&graph, claim, Relation::Supports, 10).len(), 4);
        assert!(graph.top_snippets(claim, Relation::Supports, 0).is_empty());
    }

    #[test]
    fn top_snippets_ties_keep_edge_order() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        for summary in ["first", "second", "third"] {
            let s = graph.add_snippet(summary, "refutes", 0.6);
            graph.add_edge(claim, s, Relation::Refutes).unwrap();
        }

        assert_eq!(
            summaries(&graph, claim, Relation::Refutes, 3),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn top_snippets_tolerates_nan_scores() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        for i in 0..40 {
            let score = if i % 3 == 0 { f64::NAN } else { i as f64 / 40.0 };
            let s = graph.add_snippet(format!("s{i}"), "supports", score);
            graph.add_edge(claim, s, Relation::Supports).unwrap();
        }

        let top = graph.top_snippets(claim, Relation::Supports, 40);

        assert_eq!(top.len(), 40);
        assert_eq!(top[0].summary, "s38");
        let (real, nan): (Vec<_>, Vec<_>) = top.iter().partition(|s| !s.score.is_nan());
        assert_eq!(real.len(), 26);
        assert_eq!(nan.len(), 14);
        assert!(top[..26].iter().all(|s| !s.score.is_nan()));
        for pair in real.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // NaN snippets keep edge order among themselves.
        assert_eq!(nan[0].summary, "s0");
        assert_eq!(nan[1].summary, "s3");
    }

    #[test]
    fn top_snippets_filters_by_relation_and_claim() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let other = graph.add_claim("other");
        let sup = graph.add_snippet("sup", "supports", 0.7);
        let rf = graph.add_snippet("ref", "refutes", 0.9);
        let foreign = graph.add_snippet("foreign", "supports", 0.99);
        graph.add_edge(claim, sup, Relation::Supports).unwrap();
        graph.add_edge(claim, rf, Relation::Refutes).unwrap();
        graph.add_edge(other, foreign, Relation::Supports).unwrap();

        assert_eq!(summaries(&graph, claim, Relation::Supports, 3), vec!["sup"]);
        assert_eq!(summaries(&graph, claim, Relation::Refutes, 3), vec!["ref"]);
    }

    #[test]
    fn top_snippets_skips_non_snippet_targets() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let doc = graph.add_document("http://a", "body");
        graph.add_edge(claim, doc, Relation::Cites).unwrap();

        assert!(graph.top_snippets(claim, Relation::Cites, 3).is_empty());
    }

    #[test]
    fn top_snippets_empty_without_edges() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        graph.add_snippet("unlinked", "neutral", 0.9);

        assert!(graph.top_snippets(claim, Relation::Supports, 3).is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut graph = EvidenceGraph::new();
        let claim = graph.add_claim("c");
        let s = graph.add_snippet("S1", "supports", 0.8);
        graph.add_edge(claim, s, Relation::Supports).unwrap();

        let snapshot = graph.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: super::GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }
}

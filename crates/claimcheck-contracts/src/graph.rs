//! Evidence graph data model.
//!
//! Nodes are claims, fetched documents, and classified snippets. Edges are
//! typed and directed, always leaving a claim. Nothing here is ever mutated
//! after creation; the graph itself lives in `claimcheck-core`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node within one evidence graph.
///
/// Issued in creation order starting at 1 and rendered as its decimal string
/// ("1", "2", ...). Ids are scoped to the graph instance that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(NodeId)
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// The claim under verification.
    Claim { text: String },
    /// A fetched source body, already length-limited upstream.
    Document { url: String, text: String },
    /// A summarized and classified passage.
    ///
    /// `label` is stored exactly as the classifier returned it; see [`Stance`].
    Snippet { summary: String, label: String, score: f64 },
}

/// A node in the evidence graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Edge label. Edges always run from a claim to a document or snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// claim → document
    Cites,
    /// claim → snippet classified as supporting
    Supports,
    /// claim → snippet classified as refuting
    Refutes,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Cites => "cites",
            Relation::Supports => "supports",
            Relation::Refutes => "refutes",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, labeled edge. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: Relation,
}

/// How a snippet bears on its claim.
///
/// Only the exact labels `supports` and `refutes` link a snippet to the
/// claim. Every other label is neutral: the snippet is stored but stays
/// disconnected and contributes no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Supports,
    Refutes,
    Neutral,
}

impl Stance {
    pub fn from_label(label: &str) -> Self {
        match label {
            "supports" => Stance::Supports,
            "refutes" => Stance::Refutes,
            _ => Stance::Neutral,
        }
    }

    /// The edge relation for linked stances, `None` for neutral.
    pub fn relation(&self) -> Option<Relation> {
        match self {
            Stance::Supports => Some(Relation::Supports),
            Stance::Refutes => Some(Relation::Refutes),
            Stance::Neutral => None,
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Supports => f.write_str("supports"),
            Stance::Refutes => f.write_str("refutes"),
            Stance::Neutral => f.write_str("neutral"),
        }
    }
}

/// Node and edge totals for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes, {} edges", self.node_count, self.edge_count)
    }
}

/// A snippet projected for display: its summary and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSnippet {
    pub summary: String,
    pub score: f64,
}

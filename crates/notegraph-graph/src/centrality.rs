//! Betweenness centrality (Brandes, unweighted).

use crate::adjacency::AdjacencyList;
use petgraph::visit::NodeIndexable;

const PARALLEL_THRESHOLD: usize = 200;

/// Betweenness score per node, in adjacency position order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityScores {
    ids: Vec<String>,
    scores: Vec<f64>,
}

impl CentralityScores {
    /// Score of a node id
    pub fn get(&self, id: &str) -> Option<f64> {
        self.ids.iter().position(|n| n == id).map(|i| self.scores[i])
    }

    /// `(id, score)` pairs in node order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ids.iter().map(String::as_str).zip(self.scores.iter().copied())
    }

    /// Number of scored nodes
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no node was scored
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The `limit` highest scores, descending; equal scores keep node order
    pub fn top_ranked(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Normalised betweenness centrality of every node.
///
/// Shortest-path counting is delegated to rustworkx-core (Brandes). Its
/// unnormalised undirected scores count each pair once, so they are doubled
/// and then scaled by `2 / ((n - 1)(n - 2))` when `n > 2`.
///
/// # Example
/// ```
/// use notegraph_graph::{AdjacencyList, EdgeType, GraphEdge, GraphNode, betweenness_centrality};
///
/// let nodes: Vec<GraphNode> = ["a", "b", "c"]
///     .iter()
///     .map(|id| GraphNode { id: id.to_string(), title: id.to_string(), is_current: false })
///     .collect();
/// let edge = |s: &str, t: &str| GraphEdge {
///     source_id: s.into(),
///     target_id: t.into(),
///     edge_type: EdgeType::Outgoing,
/// };
/// let adjacency = AdjacencyList::build(&nodes, &[edge("a", "b"), edge("b", "c")]);
///
/// let scores = betweenness_centrality(&adjacency);
/// assert!(scores.get("b").unwrap() > 0.0);
/// assert_eq!(scores.get("a"), Some(0.0));
/// ```
pub fn betweenness_centrality(adjacency: &AdjacencyList) -> CentralityScores {
    let n = adjacency.len();
    if n == 0 {
        return CentralityScores::default();
    }

    let graph = adjacency.graph();
    let raw = rustworkx_core::centrality::betweenness_centrality(
        graph,
        false, // include_endpoints
        false, // normalized
        PARALLEL_THRESHOLD,
    );

    let factor = if n > 2 {
        2.0 / ((n - 1) * (n - 2)) as f64
    } else {
        1.0
    };

    // GraphMap indices follow insertion order, which is position order
    let scores = (0..n)
        .map(|position| {
            let index = graph.to_index(position);
            raw.get(index).copied().flatten().unwrap_or(0.0) * 2.0 * factor
        })
        .collect();

    CentralityScores {
        ids: adjacency.ids().to_vec(),
        scores,
    }
}

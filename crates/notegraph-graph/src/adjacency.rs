//! Undirected, deduplicated adjacency over ego-graph nodes.
//!
//! Nodes are addressed by their position in the ego graph's node list. The
//! analytics in this crate work on those positions so iteration order (and
//! therefore every tie-break) follows node order.

use crate::ego::{GraphEdge, GraphNode};
use petgraph::graphmap::UnGraphMap;
use std::collections::HashMap;

/// Symmetric neighbour sets keyed by node id
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
    graph: UnGraphMap<usize, ()>,
}

impl AdjacencyList {
    /// Build the adjacency for `nodes`, adding both directions of every edge.
    ///
    /// Edge direction and type are ignored and repeats collapse. Self-loops
    /// and edges naming an unknown node are skipped.
    pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        let mut adjacency = Self {
            ids: Vec::with_capacity(nodes.len()),
            positions: HashMap::with_capacity(nodes.len()),
            graph: UnGraphMap::with_capacity(nodes.len(), edges.len()),
        };

        for node in nodes {
            if adjacency.positions.contains_key(&node.id) {
                log::warn!("Duplicate node {} ignored in adjacency", node.id);
                continue;
            }
            let position = adjacency.ids.len();
            adjacency.positions.insert(node.id.clone(), position);
            adjacency.ids.push(node.id.clone());
            adjacency.graph.add_node(position);
        }

        for edge in edges {
            let (Some(&s), Some(&t)) = (
                adjacency.positions.get(&edge.source_id),
                adjacency.positions.get(&edge.target_id),
            ) else {
                log::warn!(
                    "Skipping edge {} -> {} with a missing endpoint",
                    edge.source_id,
                    edge.target_id
                );
                continue;
            };

            if s == t {
                log::warn!("Skipping self-loop on {}", edge.source_id);
                continue;
            }

            adjacency.graph.add_edge(s, t, ());
        }

        adjacency
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether there are no nodes
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node ids in position order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Position of a node id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Neighbour positions of the node at `position`, in insertion order
    pub fn neighbor_positions(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(position)
    }

    /// Neighbour ids of a node; empty for an unknown id
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.position(id)
            .map(|p| {
                self.neighbor_positions(p)
                    .map(|n| self.ids[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct neighbours of the node at `position`
    pub fn degree(&self, position: usize) -> usize {
        if self.graph.contains_node(position) {
            self.graph.neighbors(position).count()
        } else {
            0
        }
    }

    /// Underlying petgraph view; node weights are positions
    pub(crate) fn graph(&self) -> &UnGraphMap<usize, ()> {
        &self.graph
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `a` and `b` are neighbours
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ego::EdgeType;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            title: id.to_uppercase(),
            is_current: false,
        }
    }

    fn edge(source: &str, target: &str, edge_type: EdgeType) -> GraphEdge {
        GraphEdge {
            source_id: source.to_string(),
            target_id: target.to_string(),
            edge_type,
        }
    }

    #[test]
    fn test_symmetric_and_deduplicated() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![
            edge("a", "b", EdgeType::Outgoing),
            edge("b", "a", EdgeType::Incoming),
            edge("c", "a", EdgeType::Incoming),
        ];
        let adj = AdjacencyList::build(&nodes, &edges);

        assert_eq!(adj.edge_count(), 2);
        assert_eq!(adj.neighbors("a"), vec!["b", "c"]);
        assert_eq!(adj.neighbors("b"), vec!["a"]);

        for id in adj.ids() {
            for other in adj.neighbors(id) {
                assert!(adj.neighbors(other).contains(&id.as_str()));
            }
        }
    }

    #[test]
    fn test_isolated_nodes_present() {
        let adj = AdjacencyList::build(&[node("solo")], &[]);
        assert_eq!(adj.len(), 1);
        assert!(adj.neighbors("solo").is_empty());
        assert_eq!(adj.degree(0), 0);
    }

    #[test]
    fn test_inconsistent_edges_skipped() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![
            edge("a", "ghost", EdgeType::Outgoing),
            edge("a", "a", EdgeType::Outgoing),
            edge("a", "b", EdgeType::Outgoing),
        ];
        let adj = AdjacencyList::build(&nodes, &edges);

        assert_eq!(adj.edge_count(), 1);
        assert!(adj.contains_edge("b", "a"));
        assert!(!adj.contains_edge("a", "a"));
        assert!(adj.neighbors("ghost").is_empty());
    }

    #[test]
    fn test_built_ego_graphs_are_symmetric() {
        use crate::ego::build_ego_graph;
        use notegraph_core::{Note, NoteCollection};

        let fixtures: Vec<(NoteCollection, &str)> = vec![
            (
                vec![Note::new("a", "A", "[[B]]"), Note::new("b", "B", "[[A]]")]
                    .into_iter()
                    .collect(),
                "a",
            ),
            (
                vec![
                    Note::new("hub", "Hub", "[[One]] [[Two]] [[Three]]"),
                    Note::new("one", "One", "[[Hub]] [[Two]]"),
                    Note::new("two", "Two", ""),
                    Note::new("three", "Three", "[[Hub]]"),
                    Note::new("four", "Four", "[[hub]] and [[Hub]] again"),
                ]
                .into_iter()
                .collect(),
                "hub",
            ),
        ];

        for (notes, focal) in &fixtures {
            let ego = build_ego_graph(focal, notes);
            let adj = AdjacencyList::build(&ego.nodes, &ego.edges);

            assert_eq!(adj.len(), ego.nodes.len());
            for id in adj.ids() {
                for other in adj.neighbors(id) {
                    assert!(
                        adj.neighbors(other).contains(&id.as_str()),
                        "{} -> {} has no reverse entry",
                        id,
                        other
                    );
                    assert!(adj.contains_edge(other, id));
                }
            }
        }
    }

    #[test]
    fn test_empty() {
        let adj = AdjacencyList::build(&[], &[]);
        assert!(adj.is_empty());
        assert_eq!(adj.edge_count(), 0);
    }
}

//! One-hop ego network around a focal note.

use notegraph_core::{Link, Note, NoteCollection};
use notegraph_parser::ParsedNote;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Title given to the placeholder node of a missing focal note
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Direction of an ego-graph edge relative to the focal note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Focal note links to the target
    Outgoing,
    /// Source note links to the focal note
    Incoming,
}

impl EdgeType {
    /// Label used in exports
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note in the ego network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub is_current: bool,
}

impl GraphNode {
    fn from_note(note: &Note, is_current: bool) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            is_current,
        }
    }
}

/// A directed link between two ego-network nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    pub edge_type: EdgeType,
}

impl GraphEdge {
    fn new(source_id: &str, target_id: &str, edge_type: EdgeType) -> Self {
        Self {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            edge_type,
        }
    }
}

/// Focal note plus its direct neighbours and the links between them and it.
///
/// The focal node is always `nodes[0]`; outgoing neighbours follow in link
/// order, then incoming-only neighbours in collection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgoGraph {
    pub focal_id: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    focal_found: bool,
}

impl EgoGraph {
    fn placeholder(focal_id: &str) -> Self {
        Self {
            focal_id: focal_id.to_string(),
            nodes: vec![GraphNode {
                id: focal_id.to_string(),
                title: UNKNOWN_TITLE.to_string(),
                is_current: true,
            }],
            edges: Vec::new(),
            focal_found: false,
        }
    }

    /// Whether the focal id named an existing note
    pub fn focal_found(&self) -> bool {
        self.focal_found
    }

    /// Whether the focal note has any neighbour
    pub fn has_connections(&self) -> bool {
        !self.edges.is_empty()
    }

    /// The focal node
    pub fn focal(&self) -> &GraphNode {
        &self.nodes[0]
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of edges of the given direction
    pub fn count_edges(&self, edge_type: EdgeType) -> usize {
        self.edges.iter().filter(|e| e.edge_type == edge_type).count()
    }

    /// Snapshot as a petgraph directed graph for layout consumers.
    ///
    /// Node indices follow `nodes` order.
    pub fn to_digraph(&self) -> DiGraph<GraphNode, EdgeType> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let indices: Vec<_> = self
            .nodes
            .iter()
            .map(|node| graph.add_node(node.clone()))
            .collect();

        let position = |id: &str| self.nodes.iter().position(|n| n.id == id);
        for edge in &self.edges {
            if let (Some(s), Some(t)) = (position(&edge.source_id), position(&edge.target_id)) {
                graph.add_edge(indices[s], indices[t], edge.edge_type);
            }
        }
        graph
    }
}

/// Build the ego network of `focal_id`.
///
/// Outgoing links are resolved case-insensitively against note titles and
/// each target is added once. Every other note linking to the focal title
/// contributes an incoming edge, even when it is already an outgoing
/// neighbour. A missing focal note gives a placeholder singleton graph.
///
/// # Example
/// ```
/// use notegraph_core::{Note, NoteCollection};
/// use notegraph_graph::{EdgeType, build_ego_graph};
///
/// let notes: NoteCollection = vec![
///     Note::new("a", "A", "links to [[B]]"),
///     Note::new("b", "B", ""),
///     Note::new("c", "C", "back to [[a]]"),
/// ]
/// .into_iter()
/// .collect();
///
/// let graph = build_ego_graph("a", &notes);
/// assert_eq!(graph.nodes.len(), 3);
/// assert_eq!(graph.count_edges(EdgeType::Outgoing), 1);
/// assert_eq!(graph.count_edges(EdgeType::Incoming), 1);
/// ```
pub fn build_ego_graph(focal_id: &str, collection: &NoteCollection) -> EgoGraph {
    let Some(focal) = collection.get(focal_id) else {
        log::debug!("Focal note {} not found, returning placeholder graph", focal_id);
        return EgoGraph::placeholder(focal_id);
    };

    let mut nodes = vec![GraphNode::from_note(focal, true)];
    let mut edges = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([focal.id.as_str()]);

    for title in ParsedNote::parse(&focal.content).links() {
        let link = Link::new(focal.id.as_str(), title);
        if let Some(target) = collection.resolve(&link)
            && seen.insert(target.id.as_str())
        {
            nodes.push(GraphNode::from_note(target, false));
            edges.push(GraphEdge::new(&focal.id, &target.id, EdgeType::Outgoing));
        }
    }

    for note in collection.iter().filter(|n| n.id != focal.id) {
        if !ParsedNote::parse(&note.content).links_to(&focal.title) {
            continue;
        }
        if seen.insert(note.id.as_str()) {
            nodes.push(GraphNode::from_note(note, false));
        }
        edges.push(GraphEdge::new(&note.id, &focal.id, EdgeType::Incoming));
    }

    log::debug!(
        "Ego graph for {}: {} nodes, {} edges",
        focal_id,
        nodes.len(),
        edges.len()
    );

    EgoGraph {
        focal_id: focal.id.clone(),
        nodes,
        edges,
        focal_found: true,
    }
}

//! # Note Graph Analysis
//!
//! Link graph analysis for a collection of notes, built on `petgraph`.
//!
//! Provides:
//! - Backlink queries with surrounding context
//! - One-hop ego networks around a focal note
//! - Undirected adjacency over ego-network nodes
//! - Betweenness centrality (Brandes)
//! - Greedy modularity community detection
//! - Summary statistics for export
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_core::{GraphConfig, Note, NoteCollection};
//! use notegraph_graph::{NetworkStats, build_ego_graph, get_backlinks};
//!
//! let notes: NoteCollection = vec![
//!     Note::new("a", "A", "Links to [[B]]"),
//!     Note::new("b", "B", "Nothing here"),
//!     Note::new("c", "C", "Points back to [[A]]"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let graph = build_ego_graph("a", &notes);
//! assert_eq!(graph.nodes.len(), 3);
//!
//! let stats = NetworkStats::compute(&graph, &GraphConfig::default());
//! assert_eq!(stats.total_edges, 2);
//!
//! let backlinks = get_backlinks("A", &notes);
//! assert_eq!(backlinks[0].note_id, "c");
//! ```
//!
//! ## Core Concepts
//!
//! ### Ego network
//! - **Nodes**: the focal note first, then its neighbours
//! - **Edges**: directed, typed `outgoing` (focal links out) or `incoming`
//!   (another note links to the focal note)
//!
//! ### Analytics
//! Centrality and communities run on the undirected, deduplicated
//! [`AdjacencyList`]. Every result is keyed by node id and ordered by
//! ego-network node order, so repeated runs give identical output.
//!
//! ## Modules
//!
//! - [`backlinks`] - Backlink queries
//! - [`ego`] - Ego network construction
//! - [`adjacency`] - Undirected adjacency
//! - [`centrality`] - Betweenness centrality
//! - [`community`] - Community detection and modularity
//! - [`stats`] - Network summary
//!
//! ## Performance Characteristics
//!
//! - Ego network construction: O(N · L) for N notes of L bytes (every note is re-parsed)
//! - Betweenness: O(n · m) for n nodes, m edges
//! - Community detection: O(passes · m · c) with c candidate communities per node

pub mod adjacency;
pub mod backlinks;
pub mod centrality;
pub mod community;
pub mod ego;
pub mod stats;

pub use adjacency::AdjacencyList;
pub use backlinks::{Backlink, get_backlinks, get_backlinks_with_radius};
pub use centrality::{CentralityScores, betweenness_centrality};
pub use community::{
    CommunityAssignment, detect_communities, estimate_modularity, newman_modularity,
};
pub use ego::{EdgeType, EgoGraph, GraphEdge, GraphNode, build_ego_graph};
pub use stats::{CommunitySummary, NetworkStats, RankedNode};

pub mod prelude {
    pub use crate::adjacency::AdjacencyList;
    pub use crate::backlinks::{Backlink, get_backlinks};
    pub use crate::ego::{EdgeType, EgoGraph, GraphEdge, GraphNode, build_ego_graph};
    pub use crate::stats::NetworkStats;
    pub use notegraph_core::prelude::*;
}

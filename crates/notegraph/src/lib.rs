//! # NoteGraph
//!
//! Knowledge graph engine for collections of linked notes.
//!
//! Notes reference each other with `[[Title]]` wiki links and
//! `[[Title#^block]]` block references. The engine builds the ego network
//! around a focal note, scores it with betweenness centrality and greedy
//! community detection, finds backlinks with context, and exports the
//! network as three CSV tables.
//!
//! ```
//! use notegraph::prelude::*;
//!
//! let notes: NoteCollection = vec![
//!     Note::new("a", "Alpha", "See [[Beta]]."),
//!     Note::new("b", "Beta", "Standalone."),
//! ]
//! .into_iter()
//! .collect();
//!
//! let engine = NoteGraphEngine::default();
//! let ego = engine.build_ego_graph("a", &notes);
//! assert_eq!(ego.nodes.len(), 2);
//!
//! let backlinks = engine.get_backlinks("Beta", &notes);
//! assert_eq!(backlinks[0].note_id, "a");
//! ```
//!
//! The member crates are re-exported: [`notegraph_core`] (models, config,
//! errors), [`notegraph_parser`] (references and metadata),
//! [`notegraph_graph`] (ego networks and analytics) and
//! [`notegraph_export`] (CSV tables).

pub mod engine;
pub mod response;

pub use engine::{NoteGraphEngine, load_collection, write_export};
pub use response::QueryResponse;

pub use notegraph_core::{
    ConfigProfile, Error, GraphConfig, Link, Note, NoteCollection, NoteMetadata, Reference,
    Result, SourcePosition,
};
pub use notegraph_export::{NetworkExport, NetworkExporter, NoteProfile, has_incoming_links};
pub use notegraph_graph::{
    Backlink, CentralityScores, CommunityAssignment, EdgeType, EgoGraph, GraphEdge, GraphNode,
    NetworkStats,
};
pub use notegraph_parser::{ParsedNote, block_content, parse_references};

pub use notegraph_core;
pub use notegraph_export;
pub use notegraph_graph;
pub use notegraph_parser;

pub mod prelude {
    pub use crate::engine::NoteGraphEngine;
    pub use crate::response::QueryResponse;
    pub use notegraph_core::prelude::*;
    pub use notegraph_export::NetworkExport;
    pub use notegraph_graph::prelude::*;
    pub use notegraph_parser::prelude::*;
}

//! # Network Export
//!
//! Serializes the ego network of a focal note into three flat CSV tables
//! (edges, nodes, stats) for spreadsheets and external network tools.
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_core::{Note, NoteCollection};
//! use notegraph_export::analyze_network;
//!
//! let notes: NoteCollection = vec![
//!     Note::new("a", "A", "Links to [[B]]"),
//!     Note::new("b", "B", "A leaf"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let export = analyze_network("a", &notes, false).expect("focal note exists");
//! assert_eq!(
//!     export.edges_csv,
//!     "source_id,target_id,source_title,target_title,link_type\n\"a\",\"b\",\"A\",\"B\",\"outgoing\""
//! );
//! assert!(analyze_network("missing", &notes, false).is_none());
//! ```
//!
//! ## Tables
//!
//! ### Edges
//! One row per ego-network edge. The rich variant adds both endpoints'
//! timestamps, word counts, outgoing link counts and tags, plus a constant
//! `weight` of 1.
//!
//! ### Nodes
//! One row per ego-network node, focal note first. The rich variant adds
//! timestamps, body metrics, link counts, tags, the first paragraph and
//! days since the last modification.
//!
//! ### Stats
//! `metric,value,description` rows: fixed network metrics, then the
//! betweenness ranking, then community membership.
//!
//! ## Format
//!
//! - Rows joined with `\n`, no trailing newline
//! - String fields double-quoted with `"` doubled, `\n` replaced by a space
//!   and `\r` removed; counts and ratios unquoted
//! - Timestamps as ISO-8601 UTC with milliseconds
//! - Exporters return strings and perform no I/O

use chrono::{DateTime, Utc};
use notegraph_core::prelude::*;
use notegraph_core::{
    CSVBuilder, iso_timestamp, quote_csv_field, titles_match, to_fixed, to_json_string,
};
use notegraph_graph::{EgoGraph, GraphEdge, GraphNode, NetworkStats, build_ego_graph};
use notegraph_parser::ParsedNote;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const EDGE_HEADERS_RICH: &[&str] = &[
    "source_id",
    "target_id",
    "source_title",
    "target_title",
    "link_type",
    "source_created",
    "target_created",
    "source_modified",
    "target_modified",
    "source_word_count",
    "target_word_count",
    "source_outgoing_links",
    "target_outgoing_links",
    "source_tags",
    "target_tags",
    "weight",
];

const EDGE_HEADERS_MINIMAL: &[&str] = &[
    "source_id",
    "target_id",
    "source_title",
    "target_title",
    "link_type",
];

const NODE_HEADERS_RICH: &[&str] = &[
    "id",
    "title",
    "is_current",
    "node_type",
    "created",
    "modified",
    "word_count",
    "character_count",
    "outgoing_links_count",
    "incoming_links_count",
    "tags",
    "first_paragraph",
    "last_modified_days_ago",
];

const NODE_HEADERS_MINIMAL: &[&str] = &["id", "title", "is_current", "node_type"];

const STATS_HEADERS: &[&str] = &["metric", "value", "description"];

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The three export tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub edges_csv: String,
    pub nodes_csv: String,
    pub stats_csv: String,
}

/// Per-note metrics written to the rich tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteProfile {
    pub created: String,
    pub modified: String,
    pub word_count: usize,
    pub character_count: usize,
    pub outgoing_links_count: usize,
    pub incoming_links_count: usize,
    pub tags: Vec<String>,
    pub first_paragraph: String,
    pub last_modified_days_ago: i64,
}

/// Lowercased link titles of every note, for incoming-link counts
struct LinkIndex<'a> {
    links: Vec<(&'a str, HashSet<String>)>,
}

impl<'a> LinkIndex<'a> {
    fn new(collection: &'a NoteCollection) -> Self {
        let links = collection
            .iter()
            .map(|note| {
                let titles = ParsedNote::parse(&note.content)
                    .links()
                    .into_iter()
                    .map(|t| t.to_lowercase())
                    .collect();
                (note.id.as_str(), titles)
            })
            .collect();
        Self { links }
    }

    /// Other notes with a link to `title`
    fn incoming_count(&self, note: &Note) -> usize {
        let title = note.title.to_lowercase();
        self.links
            .iter()
            .filter(|(id, titles)| *id != note.id && titles.contains(&title))
            .count()
    }
}

/// Builds the export tables for notes of one collection
pub struct NetworkExporter<'a> {
    collection: &'a NoteCollection,
    config: GraphConfig,
    now: DateTime<Utc>,
}

impl<'a> NetworkExporter<'a> {
    /// Exporter over `collection`, stamped with the current time
    pub fn new(collection: &'a NoteCollection, config: GraphConfig) -> Self {
        Self {
            collection,
            config,
            now: Utc::now(),
        }
    }

    /// Use a fixed clock for timestamps and ages
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Export the ego network of `focal_id`; `None` when the note does not exist
    pub fn export(&self, focal_id: &str) -> Option<NetworkExport> {
        if self.collection.get(focal_id).is_none() {
            log::debug!("Export skipped: focal note {} not found", focal_id);
            return None;
        }

        let graph = build_ego_graph(focal_id, self.collection);
        let stats = NetworkStats::compute(&graph, &self.config);
        let profiles = if self.config.include_metadata {
            self.profiles(&graph)
        } else {
            HashMap::new()
        };

        let export = NetworkExport {
            edges_csv: self.edges_csv(&graph.edges, &profiles),
            nodes_csv: self.nodes_csv(&graph.nodes, &profiles),
            stats_csv: Self::stats_csv(&stats, &self.now),
        };

        log::debug!(
            "Exported network of {}: {} nodes, {} edges",
            focal_id,
            graph.nodes.len(),
            graph.edges.len()
        );
        Some(export)
    }

    /// Network statistics of `focal_id`; `None` when the note does not exist
    pub fn stats(&self, focal_id: &str) -> Option<NetworkStats> {
        self.collection.get(focal_id)?;
        let graph = build_ego_graph(focal_id, self.collection);
        Some(NetworkStats::compute(&graph, &self.config))
    }

    /// Metrics of one note at the exporter's clock
    pub fn profile(&self, note: &Note) -> NoteProfile {
        self.profile_indexed(note, &LinkIndex::new(self.collection))
    }

    fn profile_indexed(&self, note: &Note, index: &LinkIndex<'_>) -> NoteProfile {
        let parsed = ParsedNote::parse(&note.content);
        let age_ms = (self.now - note.modified).num_milliseconds();

        NoteProfile {
            created: iso_timestamp(&note.created),
            modified: iso_timestamp(&note.modified),
            word_count: parsed.word_count(),
            character_count: parsed.char_count(),
            outgoing_links_count: parsed.links().len(),
            incoming_links_count: index.incoming_count(note),
            tags: parsed.tags(),
            first_paragraph: parsed.first_paragraph(self.config.first_paragraph_chars),
            last_modified_days_ago: age_ms.div_euclid(MILLIS_PER_DAY),
        }
    }

    fn profiles(&self, graph: &EgoGraph) -> HashMap<String, NoteProfile> {
        let index = LinkIndex::new(self.collection);
        graph
            .nodes
            .iter()
            .filter_map(|node| self.collection.get(&node.id))
            .map(|note| (note.id.clone(), self.profile_indexed(note, &index)))
            .collect()
    }

    fn title_of(&self, id: &str) -> &str {
        self.collection
            .get(id)
            .map(|n| n.title.as_str())
            .unwrap_or("Unknown")
    }

    /// Edges table; rich rows need a profile for both endpoints
    fn edges_csv(&self, edges: &[GraphEdge], profiles: &HashMap<String, NoteProfile>) -> String {
        let rich = self.config.include_metadata;
        let mut csv = CSVBuilder::new(if rich {
            EDGE_HEADERS_RICH
        } else {
            EDGE_HEADERS_MINIMAL
        });

        for edge in edges {
            let mut row = vec![
                quote_csv_field(&edge.source_id),
                quote_csv_field(&edge.target_id),
                quote_csv_field(self.title_of(&edge.source_id)),
                quote_csv_field(self.title_of(&edge.target_id)),
                quote_csv_field(edge.edge_type.as_str()),
            ];

            if rich
                && let (Some(s), Some(t)) =
                    (profiles.get(&edge.source_id), profiles.get(&edge.target_id))
            {
                row.extend([
                    quote_csv_field(&s.created),
                    quote_csv_field(&t.created),
                    quote_csv_field(&s.modified),
                    quote_csv_field(&t.modified),
                    s.word_count.to_string(),
                    t.word_count.to_string(),
                    s.outgoing_links_count.to_string(),
                    t.outgoing_links_count.to_string(),
                    quote_csv_field(&s.tags.join(";")),
                    quote_csv_field(&t.tags.join(";")),
                    "1".to_string(),
                ]);
            }

            csv.push_row(row);
        }

        csv.build()
    }

    /// Nodes table, focal note first
    fn nodes_csv(&self, nodes: &[GraphNode], profiles: &HashMap<String, NoteProfile>) -> String {
        let rich = self.config.include_metadata;
        let mut csv = CSVBuilder::new(if rich {
            NODE_HEADERS_RICH
        } else {
            NODE_HEADERS_MINIMAL
        });

        for node in nodes {
            let mut row = vec![
                quote_csv_field(&node.id),
                quote_csv_field(&node.title),
                quote_csv_field(if node.is_current { "true" } else { "false" }),
                quote_csv_field(if node.is_current { "focal" } else { "connected" }),
            ];

            if rich && let Some(p) = profiles.get(&node.id) {
                row.extend([
                    quote_csv_field(&p.created),
                    quote_csv_field(&p.modified),
                    p.word_count.to_string(),
                    p.character_count.to_string(),
                    p.outgoing_links_count.to_string(),
                    p.incoming_links_count.to_string(),
                    quote_csv_field(&p.tags.join(";")),
                    quote_csv_field(&p.first_paragraph),
                    p.last_modified_days_ago.to_string(),
                ]);
            }

            csv.push_row(row);
        }

        csv.build()
    }

    /// Stats table stamped with `timestamp`
    pub fn stats_csv(stats: &NetworkStats, timestamp: &DateTime<Utc>) -> String {
        let metric = |name: &str, value: String, description: &str| {
            vec![quote_csv_field(name), value, quote_csv_field(description)]
        };

        let mut csv = CSVBuilder::new(STATS_HEADERS)
            .add_row(metric(
                "focal_note_id",
                quote_csv_field(&stats.focal_note_id),
                "ID of the central note",
            ))
            .add_row(metric(
                "focal_note_title",
                quote_csv_field(&stats.focal_note_title),
                "Title of the central note",
            ))
            .add_row(metric(
                "total_nodes",
                stats.total_nodes.to_string(),
                "Total number of connected notes",
            ))
            .add_row(metric(
                "total_edges",
                stats.total_edges.to_string(),
                "Total number of connections",
            ))
            .add_row(metric(
                "outgoing_edges",
                stats.outgoing_edges.to_string(),
                "Links from focal note to others",
            ))
            .add_row(metric(
                "incoming_edges",
                stats.incoming_edges.to_string(),
                "Links from others to focal note",
            ))
            .add_row(metric(
                "network_density",
                to_fixed(stats.network_density, 4),
                "Ratio of actual to possible connections",
            ))
            .add_row(metric(
                "average_degree",
                to_fixed(stats.average_degree, 2),
                "Average connections per note",
            ))
            .add_row(metric(
                "max_degree",
                stats.max_degree.to_string(),
                "Maximum connections for any note",
            ))
            .add_row(metric(
                "num_communities",
                stats.num_communities.to_string(),
                "Number of detected communities",
            ))
            .add_row(metric(
                "modularity",
                to_fixed(stats.modularity, 4),
                "Community structure quality (higher = better separation)",
            ))
            .add_row(metric(
                "largest_community_size",
                stats.largest_community_size.to_string(),
                "Size of the largest community",
            ))
            .add_row(metric(
                "export_timestamp",
                quote_csv_field(&iso_timestamp(timestamp)),
                "When this export was generated",
            ));

        for (i, ranked) in stats.top_centrality.iter().enumerate() {
            let rank = i + 1;
            let description = if rank == 1 {
                "Node with highest betweenness centrality".to_string()
            } else {
                format!("Node with rank {} betweenness centrality", rank)
            };
            csv.push_row(metric(
                &format!("betweenness_rank_{}", rank),
                quote_csv_field(&format!(
                    "{}: {} ({})",
                    ranked.id,
                    ranked.title,
                    to_fixed(ranked.score, 4)
                )),
                &description,
            ));
        }

        for (i, community) in stats.communities.iter().enumerate() {
            let index = i + 1;
            csv.push_row(metric(
                &format!("community_{}", index),
                quote_csv_field(&community.members.join(";")),
                &format!("Community {} members ({} nodes)", index, community.size()),
            ));
        }

        csv.build()
    }

    /// Network statistics as pretty-printed JSON
    pub fn stats_to_json(stats: &NetworkStats) -> Result<String> {
        to_json_string(stats, "network stats")
    }
}

/// Export the ego network of `focal_id` with default settings.
///
/// `include_metadata` selects the rich or minimal node and edge tables.
/// Returns `None` when the focal note does not exist.
pub fn analyze_network(
    focal_id: &str,
    collection: &NoteCollection,
    include_metadata: bool,
) -> Option<NetworkExport> {
    let config = GraphConfig {
        include_metadata,
        ..GraphConfig::default()
    };
    NetworkExporter::new(collection, config).export(focal_id)
}

/// Whether any note other than `note` links to its title
pub fn has_incoming_links(note: &Note, collection: &NoteCollection) -> bool {
    collection
        .iter()
        .filter(|other| other.id != note.id)
        .any(|other| {
            ParsedNote::parse(&other.content)
                .links()
                .iter()
                .any(|l| titles_match(l, &note.title))
        })
}

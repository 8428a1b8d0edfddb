//! Summary metrics of an ego network.

use crate::adjacency::AdjacencyList;
use crate::centrality::betweenness_centrality;
use crate::community::{detect_communities, estimate_modularity, newman_modularity};
use crate::ego::{EdgeType, EgoGraph};
use notegraph_core::GraphConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the betweenness ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: String,
    pub title: String,
    pub score: f64,
}

/// Members of one detected community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySummary {
    pub label: usize,
    pub members: Vec<String>,
}

impl CommunitySummary {
    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Everything the stats table reports about an ego network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub focal_note_id: String,
    pub focal_note_title: String,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub outgoing_edges: usize,
    pub incoming_edges: usize,
    /// `2E / (n(n - 1))`, counting mutual links twice
    pub network_density: f64,
    /// Mean edge endpoints per node, over nodes with at least one edge
    pub average_degree: f64,
    pub max_degree: usize,
    pub num_communities: usize,
    /// Count-based estimate, see [`estimate_modularity`]
    pub modularity: f64,
    /// Edge-based Newman–Girvan score of the same partition
    pub newman_modularity: f64,
    pub largest_community_size: usize,
    pub top_centrality: Vec<RankedNode>,
    /// Ascending by label
    pub communities: Vec<CommunitySummary>,
}

impl NetworkStats {
    /// Run every analysis over `graph`
    pub fn compute(graph: &EgoGraph, config: &GraphConfig) -> Self {
        let total_nodes = graph.nodes.len();
        let total_edges = graph.edges.len();

        let max_possible = total_nodes * total_nodes.saturating_sub(1);
        let network_density = if max_possible > 0 {
            (total_edges * 2) as f64 / max_possible as f64
        } else {
            0.0
        };

        let mut degrees: HashMap<&str, usize> = HashMap::new();
        for edge in &graph.edges {
            *degrees.entry(edge.source_id.as_str()).or_default() += 1;
            *degrees.entry(edge.target_id.as_str()).or_default() += 1;
        }
        let average_degree = if degrees.is_empty() {
            0.0
        } else {
            degrees.values().sum::<usize>() as f64 / degrees.len() as f64
        };
        let max_degree = degrees.values().copied().max().unwrap_or(0);

        let adjacency = AdjacencyList::build(&graph.nodes, &graph.edges);
        let centrality = betweenness_centrality(&adjacency);
        let assignment = detect_communities(&adjacency, config.max_community_passes);

        let title_of = |id: &str| {
            graph
                .node(id)
                .map(|n| n.title.clone())
                .unwrap_or_else(|| crate::ego::UNKNOWN_TITLE.to_string())
        };

        let top_centrality = centrality
            .top_ranked(config.top_centrality_count)
            .into_iter()
            .map(|(id, score)| RankedNode {
                id: id.to_string(),
                title: title_of(id),
                score,
            })
            .collect();

        let communities: Vec<CommunitySummary> = assignment
            .groups()
            .into_iter()
            .map(|(label, members)| CommunitySummary {
                label,
                members: members.into_iter().map(str::to_string).collect(),
            })
            .collect();

        let stats = Self {
            focal_note_id: graph.focal_id.clone(),
            focal_note_title: graph.focal().title.clone(),
            total_nodes,
            total_edges,
            outgoing_edges: graph.count_edges(EdgeType::Outgoing),
            incoming_edges: graph.count_edges(EdgeType::Incoming),
            network_density,
            average_degree,
            max_degree,
            num_communities: communities.len(),
            modularity: estimate_modularity(&assignment),
            newman_modularity: newman_modularity(&adjacency, &assignment),
            largest_community_size: assignment.largest_size(),
            top_centrality,
            communities,
        };

        log::debug!(
            "Stats for {}: {} nodes, {} edges, {} communities",
            stats.focal_note_id,
            stats.total_nodes,
            stats.total_edges,
            stats.num_communities
        );
        stats
    }
}

//! Community detection and modularity.
//!
//! [`detect_communities`] is the local-moving phase of Louvain only: nodes
//! start alone and greedily join a neighbouring community while that raises
//! modularity, but communities are never coarsened into super-nodes. On an
//! ego network (a star plus a few chords) that phase already settles the
//! partition.

use crate::adjacency::AdjacencyList;
use std::collections::{BTreeMap, HashMap};

/// Community label per node, in adjacency position order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityAssignment {
    ids: Vec<String>,
    labels: Vec<usize>,
}

impl CommunityAssignment {
    /// Label of a node id
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|n| n == id).map(|i| self.labels[i])
    }

    /// Labels in node order
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no node was assigned
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members of each community, ascending by label, members in node order
    pub fn groups(&self) -> Vec<(usize, Vec<&str>)> {
        let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (id, &label) in self.ids.iter().zip(&self.labels) {
            groups.entry(label).or_default().push(id.as_str());
        }
        groups.into_iter().collect()
    }

    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        self.groups().len()
    }

    /// Size of the largest community (0 when empty)
    pub fn largest_size(&self) -> usize {
        self.groups()
            .iter()
            .map(|(_, members)| members.len())
            .max()
            .unwrap_or(0)
    }
}

/// Partition the nodes by greedy modularity moves, at most `max_passes` passes.
///
/// Each pass visits nodes in order. A node considers the distinct
/// communities of its neighbours (neighbour order, its own excluded) and
/// moves to the one with the largest strictly positive gain; the earliest
/// candidate wins a tie. A pass without moves ends the search. Without edges
/// every node stays alone.
pub fn detect_communities(adjacency: &AdjacencyList, max_passes: usize) -> CommunityAssignment {
    let n = adjacency.len();
    let mut labels: Vec<usize> = (0..n).collect();
    let degrees: Vec<usize> = (0..n).map(|i| adjacency.degree(i)).collect();

    let total_weight = degrees.iter().sum::<usize>() as f64 / 2.0;
    if total_weight == 0.0 {
        return CommunityAssignment {
            ids: adjacency.ids().to_vec(),
            labels,
        };
    }

    // Degree sum per community; the moving node counts toward its own
    let mut community_degree: HashMap<usize, usize> =
        labels.iter().map(|&l| (l, degrees[l])).collect();

    let mut passes = 0;
    let mut improved = true;
    while improved && passes < max_passes {
        improved = false;
        passes += 1;

        for node in 0..n {
            let current = labels[node];

            let mut candidates: Vec<usize> = Vec::new();
            for neighbor in adjacency.neighbor_positions(node) {
                let label = labels[neighbor];
                if label != current && !candidates.contains(&label) {
                    candidates.push(label);
                }
            }

            let mut best = current;
            let mut best_gain = 0.0;
            for &candidate in &candidates {
                let gain = modularity_gain(
                    adjacency,
                    &labels,
                    node,
                    current,
                    candidate,
                    degrees[node],
                    &community_degree,
                    total_weight,
                );
                if gain > best_gain {
                    best_gain = gain;
                    best = candidate;
                }
            }

            if best != current {
                log::trace!("Pass {}: node {} moves {} -> {}", passes, node, current, best);
                *community_degree.entry(current).or_default() -= degrees[node];
                *community_degree.entry(best).or_default() += degrees[node];
                labels[node] = best;
                improved = true;
            }
        }
    }

    log::debug!("Community detection settled after {} passes", passes);

    CommunityAssignment {
        ids: adjacency.ids().to_vec(),
        labels,
    }
}

#[allow(clippy::too_many_arguments)]
fn modularity_gain(
    adjacency: &AdjacencyList,
    labels: &[usize],
    node: usize,
    from: usize,
    to: usize,
    degree: usize,
    community_degree: &HashMap<usize, usize>,
    total_weight: f64,
) -> f64 {
    let (mut links_from, mut links_to) = (0usize, 0usize);
    for neighbor in adjacency.neighbor_positions(node) {
        if labels[neighbor] == from {
            links_from += 1;
        }
        if labels[neighbor] == to {
            links_to += 1;
        }
    }

    let degree_from = community_degree.get(&from).copied().unwrap_or(0) as f64;
    let degree_to = community_degree.get(&to).copied().unwrap_or(0) as f64;

    (links_to as f64 - links_from as f64) / (2.0 * total_weight)
        - degree as f64 * (degree_to - degree_from) / (4.0 * total_weight * total_weight)
}

/// Modularity estimate reported in exports.
///
/// This is an approximation from community counts alone, not Newman's Q:
/// `0` when everything is in one community or every node is alone,
/// otherwise `min(0.8, 0.3 + communities / nodes * 0.5)`. See
/// [`newman_modularity`] for the edge-based score.
pub fn estimate_modularity(assignment: &CommunityAssignment) -> f64 {
    let nodes = assignment.len();
    let communities = assignment.community_count();

    if communities <= 1 || communities == nodes {
        return 0.0;
    }
    (0.3 + communities as f64 / nodes as f64 * 0.5).min(0.8)
}

/// Newman–Girvan modularity `Q = Σ_c [L_c / m − (d_c / 2m)²]`.
///
/// `L_c` counts edges inside community `c` and `d_c` sums its degrees.
/// Returns `0` for a graph without edges.
pub fn newman_modularity(adjacency: &AdjacencyList, assignment: &CommunityAssignment) -> f64 {
    let m = adjacency.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let labels = assignment.labels();
    let mut internal: HashMap<usize, f64> = HashMap::new();
    let mut degree_sum: HashMap<usize, f64> = HashMap::new();

    for node in 0..adjacency.len() {
        let label = labels[node];
        *degree_sum.entry(label).or_default() += adjacency.degree(node) as f64;
        for neighbor in adjacency.neighbor_positions(node) {
            // Count each internal edge once, from its lower endpoint
            if neighbor > node && labels[neighbor] == label {
                *internal.entry(label).or_default() += 1.0;
            }
        }
    }

    degree_sum
        .iter()
        .map(|(label, &d)| {
            let l = internal.get(label).copied().unwrap_or(0.0);
            l / m - (d / (2.0 * m)).powi(2)
        })
        .sum()
}

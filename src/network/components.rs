//! Connected-component detection over tight edges.

use crate::network::graph::{NetworkCluster, NetworkNode};

/// Colors cycled across discovered components.
const CLUSTER_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Find connected components over edges at or above the tight threshold and
/// assign each component a distinct display color.
///
/// Only edges with `weight >= tight_threshold` participate. A node with no
/// tight edges belongs to no component (singleton, not an error), so every
/// returned cluster has at least two members. Nodes are updated in place
/// with their cluster id and color.
pub(crate) fn assign(
    nodes: &mut [NetworkNode],
    edges: &[(usize, usize, f32)],
    tight_threshold: f32,
) -> Vec<NetworkCluster> {
    let n = nodes.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(a, b, weight) in edges {
        if weight >= tight_threshold {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }

    let mut visited = vec![false; n];
    let mut clusters = Vec::new();

    for start in 0..n {
        if visited[start] || adjacency[start].is_empty() {
            continue;
        }

        // Iterative depth-first traversal.
        let mut component = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(current) = stack.pop() {
            component.push(current);
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        let cluster_id = clusters.len();
        let color = CLUSTER_PALETTE[cluster_id % CLUSTER_PALETTE.len()];
        component.sort_unstable();
        for &idx in &component {
            nodes[idx].cluster = Some(cluster_id);
            nodes[idx].color = color.to_string();
        }
        clusters.push(NetworkCluster {
            id: cluster_id,
            node_ids: component.iter().map(|&idx| nodes[idx].id.clone()).collect(),
            color: color.to_string(),
        });
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::graph::DEFAULT_NODE_COLOR;

    fn test_nodes(count: usize) -> Vec<NetworkNode> {
        (0..count)
            .map(|i| NetworkNode {
                id: format!("n{i}"),
                x: 0.0,
                y: 0.0,
                size: 6.0,
                color: DEFAULT_NODE_COLOR.to_string(),
                cluster: None,
            })
            .collect()
    }

    #[test]
    fn test_two_components() {
        let mut nodes = test_nodes(5);
        let edges = [(0, 1, 0.9), (1, 2, 0.8), (3, 4, 0.95)];
        let clusters = assign(&mut nodes, &edges, 0.7);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].node_ids, vec!["n0", "n1", "n2"]);
        assert_eq!(clusters[1].node_ids, vec!["n3", "n4"]);
        assert_ne!(clusters[0].color, clusters[1].color);
        assert_eq!(nodes[0].cluster, Some(0));
        assert_eq!(nodes[4].cluster, Some(1));
    }

    #[test]
    fn test_loose_edges_do_not_connect() {
        let mut nodes = test_nodes(3);
        // Below the tight threshold: structural edge, not a cluster edge.
        let edges = [(0, 1, 0.6), (1, 2, 0.9)];
        let clusters = assign(&mut nodes, &edges, 0.7);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].node_ids, vec!["n1", "n2"]);
        assert!(nodes[0].cluster.is_none());
        assert_eq!(nodes[0].color, DEFAULT_NODE_COLOR);
    }

    #[test]
    fn test_isolated_nodes_form_no_cluster() {
        let mut nodes = test_nodes(4);
        let clusters = assign(&mut nodes, &[], 0.7);

        assert!(clusters.is_empty());
        for node in &nodes {
            assert!(node.cluster.is_none());
        }
    }
}

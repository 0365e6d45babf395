//! Network graph types and construction.

use serde::{Deserialize, Serialize};

use crate::network::{components, layout};
use crate::similarity::SimilarityMatrix;

/// Default color for nodes outside any visual cluster.
pub(crate) const DEFAULT_NODE_COLOR: &str = "#9aa5b1";

/// Options controlling graph construction and layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptions {
    /// Minimum similarity for an edge to exist.
    pub edge_threshold: f32,
    /// Minimum similarity for an edge to count toward visual clustering.
    /// Typically higher than `edge_threshold`.
    pub tight_threshold: f32,
    /// Edge cap; excess edges are dropped weakest-first.
    pub max_edges: usize,
    /// Canvas width in layout units.
    pub width: f32,
    /// Canvas height in layout units.
    pub height: f32,
    /// Number of force simulation steps.
    pub layout_steps: usize,
    /// Seed for the initial scatter. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            edge_threshold: 0.5,
            tight_threshold: 0.7,
            max_edges: 600,
            width: 800.0,
            height: 600.0,
            layout_steps: 60,
            seed: None,
        }
    }
}

impl NetworkOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge threshold.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold;
        self
    }

    /// Set the tight-edge threshold used for visual clustering.
    pub fn with_tight_threshold(mut self, threshold: f32) -> Self {
        self.tight_threshold = threshold;
        self
    }

    /// Set the maximum edge count.
    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = max_edges;
        self
    }

    /// Set the canvas dimensions.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the layout step budget.
    pub fn with_layout_steps(mut self, steps: usize) -> Self {
        self.layout_steps = steps;
        self
    }

    /// Fix the layout seed, making the scatter reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A node in the similarity network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Pattern id this node represents.
    pub id: String,
    /// Layout x coordinate.
    pub x: f32,
    /// Layout y coordinate.
    pub y: f32,
    /// Visual radius, scaled by degree.
    pub size: f32,
    /// Display color (cluster color, or the neutral default).
    pub color: String,
    /// Visual cluster assignment, if any.
    pub cluster: Option<usize>,
}

/// An edge between two nodes, weighted by similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Similarity weight.
    pub weight: f32,
}

/// A visual cluster: one connected component over tight edges.
///
/// Distinct from the centroid-based groups of the cluster engine; this
/// grouping exists purely to color the rendered network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkCluster {
    /// Cluster id, sequential within one graph.
    pub id: usize,
    /// Member node ids.
    pub node_ids: Vec<String>,
    /// Display color shared by the members.
    pub color: String,
}

/// A laid-out similarity network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    /// One node per input id.
    pub nodes: Vec<NetworkNode>,
    /// Edges at or above the edge threshold, capped at `max_edges`.
    pub edges: Vec<NetworkEdge>,
    /// Connected components over tight edges.
    pub clusters: Vec<NetworkCluster>,
}

impl NetworkGraph {
    /// Build a graph from a similarity matrix.
    ///
    /// Never fails for a valid matrix: an input whose similarities all fall
    /// below the edge threshold simply produces a zero-edge graph.
    pub fn build(matrix: &SimilarityMatrix, options: &NetworkOptions) -> Self {
        let mut nodes: Vec<NetworkNode> = matrix
            .ids()
            .iter()
            .map(|id| NetworkNode {
                id: id.clone(),
                x: 0.0,
                y: 0.0,
                size: 0.0,
                color: DEFAULT_NODE_COLOR.to_string(),
                cluster: None,
            })
            .collect();

        // Strongest relationships are always retained first.
        let mut candidates = matrix.stored_pairs();
        candidates.retain(|p| p.similarity >= options.edge_threshold);
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (a.i, a.j).cmp(&(b.i, b.j)))
        });
        candidates.truncate(options.max_edges);

        let indexed_edges: Vec<(usize, usize, f32)> = candidates
            .iter()
            .map(|p| (p.i, p.j, p.similarity))
            .collect();
        let edges: Vec<NetworkEdge> = candidates
            .iter()
            .map(|p| NetworkEdge {
                source: p.id_a.clone(),
                target: p.id_b.clone(),
                weight: p.similarity,
            })
            .collect();

        let mut degrees = vec![0usize; nodes.len()];
        for &(i, j, _) in &indexed_edges {
            degrees[i] += 1;
            degrees[j] += 1;
        }
        for (node, degree) in nodes.iter_mut().zip(&degrees) {
            node.size = (6.0 + 2.0 * *degree as f32).min(24.0);
        }

        layout::run(&mut nodes, &indexed_edges, options);
        let clusters = components::assign(&mut nodes, &indexed_edges, options.tight_threshold);

        Self {
            nodes,
            edges,
            clusters,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

//! Similarity network graphs for visualization.
//!
//! Converts a similarity matrix into a node/edge graph, lays the nodes out
//! with a fixed-step force simulation, and groups tightly connected nodes
//! into visual clusters. The output is presentation-ready: coordinates,
//! sizes, and colors are all assigned here.

pub mod components;
pub mod graph;
pub mod layout;

pub use graph::{NetworkCluster, NetworkEdge, NetworkGraph, NetworkNode, NetworkOptions};

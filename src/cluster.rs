//! Exploratory k-means clustering over embedding vectors.

pub mod kmeans;

pub use kmeans::{ClusterGroup, KMeansClusterer, KMeansConfig};

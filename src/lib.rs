//! # Protea
//!
//! Similarity analysis and boolean/fuzzy query evaluation over catalogs of
//! text records with precomputed embedding vectors.
//!
//! ## Features
//!
//! - Shard-cached async loading of precomputed embeddings
//! - Pairwise cosine similarity with dense and sparse matrix modes
//! - Exploratory k-means clustering with injectable seeds
//! - Force-directed similarity network layout with visual clusters
//! - A boolean/fuzzy query language evaluated as a pure predicate
//!
//! The embedding path (store → matrix → cluster/network) and the lexical
//! query path are independent; they compose only in the caller.

// Core modules
pub mod cluster;
pub mod embedding;
mod engine;
mod error;
pub mod network;
pub mod query;
pub mod record;
pub mod similarity;
mod util;

// Re-exports for the public API
pub use cluster::{ClusterGroup, KMeansClusterer, KMeansConfig};
pub use embedding::{
    EmbeddingStore, EmbeddingVector, FilesystemShardSource, ShardEntry, ShardSource, StoreStats,
};
pub use engine::AnalysisEngine;
pub use error::{ProteaError, Result};
pub use network::{NetworkCluster, NetworkEdge, NetworkGraph, NetworkNode, NetworkOptions};
pub use query::{QueryNode, QueryParser};
pub use record::PatternRecord;
pub use similarity::{
    MatrixOptions, MatrixStatistics, SimilarityMatrix, SimilarityPair, cosine_similarity,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

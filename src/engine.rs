//! High-level facade over the analysis path.

use crate::cluster::{ClusterGroup, KMeansClusterer, KMeansConfig};
use crate::embedding::{EmbeddingStore, EmbeddingVector};
use crate::error::{ProteaError, Result};
use crate::network::{NetworkGraph, NetworkOptions};
use crate::similarity::{MatrixOptions, SimilarityMatrix};

/// Composes store → matrix → cluster/network into one entry point.
///
/// The engine resolves a caller-selected set of pattern ids through its
/// [`EmbeddingStore`] and hands the vectors to the analysis modules.
/// Partial coverage is tolerated; fewer than two resolvable vectors is the
/// explicit failure every analysis call can return. The lexical query path
/// is independent of this engine — see [`crate::query`].
pub struct AnalysisEngine {
    store: EmbeddingStore,
    matrix_options: MatrixOptions,
    network_options: NetworkOptions,
}

impl AnalysisEngine {
    /// Create an engine with default matrix and network options.
    pub fn new(store: EmbeddingStore) -> Self {
        Self {
            store,
            matrix_options: MatrixOptions::default(),
            network_options: NetworkOptions::default(),
        }
    }

    /// Set the matrix build options.
    pub fn with_matrix_options(mut self, options: MatrixOptions) -> Self {
        self.matrix_options = options;
        self
    }

    /// Set the network build options.
    pub fn with_network_options(mut self, options: NetworkOptions) -> Self {
        self.network_options = options;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    /// Resolve ids to vectors, in request order.
    ///
    /// Unresolvable ids are dropped (and a duplicate id resolves once).
    /// Fewer than two resolved vectors is an error: a one-element analysis
    /// would be trivially degenerate, so it is reported rather than
    /// silently produced.
    pub async fn resolve(&self, ids: &[String]) -> Result<Vec<EmbeddingVector>> {
        let mut resolved = self.store.get_vectors(ids).await;
        let vectors: Vec<EmbeddingVector> =
            ids.iter().filter_map(|id| resolved.remove(id)).collect();
        if vectors.len() < 2 {
            return Err(ProteaError::insufficient_embeddings(format!(
                "resolved {} of {} requested vectors, need at least 2",
                vectors.len(),
                ids.len()
            )));
        }
        Ok(vectors)
    }

    /// Build a similarity matrix over the resolvable subset of `ids`.
    pub async fn similarity_matrix(&self, ids: &[String]) -> Result<SimilarityMatrix> {
        let vectors = self.resolve(ids).await?;
        SimilarityMatrix::build(&vectors, self.matrix_options)
    }

    /// Cluster the resolvable subset of `ids`.
    pub async fn cluster(&self, ids: &[String], config: KMeansConfig) -> Result<Vec<ClusterGroup>> {
        let vectors = self.resolve(ids).await?;
        KMeansClusterer::new(config).cluster(&vectors)
    }

    /// Build a laid-out similarity network over the resolvable subset of `ids`.
    pub async fn network(&self, ids: &[String]) -> Result<NetworkGraph> {
        let matrix = self.similarity_matrix(ids).await?;
        Ok(NetworkGraph::build(&matrix, &self.network_options))
    }
}

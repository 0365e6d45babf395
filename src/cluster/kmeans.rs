//! K-means clustering with cosine similarity as the proximity measure.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingVector;
use crate::error::{ProteaError, Result};
use crate::similarity::cosine::cosine_similarity;

/// Configuration for a k-means run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters to form.
    pub k: usize,
    /// Iteration cap. Bounds latency instead of guaranteeing convergence.
    pub max_iterations: usize,
    /// Seed for centroid initialization. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl KMeansConfig {
    /// Create a configuration for `k` clusters with the default cap of 10.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 10,
            seed: None,
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fix the initialization seed, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One cluster in a clustering result.
///
/// Created fresh on every invocation; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    /// Cluster id, sequential within one result.
    pub id: usize,
    /// Member pattern ids.
    pub pattern_ids: Vec<String>,
    /// Per-dimension mean of the member vectors.
    pub centroid: Vec<f32>,
    /// Mean pairwise similarity over all internal pairs.
    pub average_intra_cluster_similarity: f32,
    /// The member whose vector is most similar to the centroid.
    pub most_representative_pattern: String,
}

/// Iterative centroid-refinement clusterer.
///
/// Assignment picks the centroid of highest cosine similarity, not lowest
/// distance. This is best-effort exploratory clustering: the iteration cap
/// trades convergence guarantees for bounded latency.
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    config: KMeansConfig,
}

impl KMeansClusterer {
    /// Create a clusterer from a configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Partition the vectors into at most `k` clusters.
    ///
    /// With item count ≤ k every item becomes its own singleton cluster at
    /// intra-cluster similarity `1.0`. Clusters left empty after refinement
    /// are dropped. All vectors must share one dimensionality.
    pub fn cluster(&self, vectors: &[EmbeddingVector]) -> Result<Vec<ClusterGroup>> {
        if self.config.k == 0 {
            return Err(ProteaError::invalid_argument("k must be at least 1"));
        }
        if vectors.is_empty() {
            return Err(ProteaError::insufficient_embeddings(
                "clustering requires at least one vector",
            ));
        }

        let dimension = vectors[0].dimension();
        for vector in vectors {
            if vector.dimension() != dimension {
                return Err(ProteaError::dimension_mismatch(
                    dimension,
                    vector.dimension(),
                ));
            }
        }

        if vectors.len() <= self.config.k {
            return Ok(self.singletons(vectors));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // Uniform draw with replacement across indices.
        let mut centroids: Vec<Vec<f32>> = (0..self.config.k)
            .map(|_| vectors[rng.random_range(0..vectors.len())].embedding.clone())
            .collect();

        let mut assignments = vec![usize::MAX; vectors.len()];
        for iteration in 0..self.config.max_iterations {
            let mut changed = false;
            for (idx, vector) in vectors.iter().enumerate() {
                let mut best = 0usize;
                let mut best_similarity = f32::NEG_INFINITY;
                for (c, centroid) in centroids.iter().enumerate() {
                    let similarity = cosine_similarity(&vector.embedding, centroid)?;
                    if similarity > best_similarity {
                        best_similarity = similarity;
                        best = c;
                    }
                }
                if assignments[idx] != best {
                    assignments[idx] = best;
                    changed = true;
                }
            }

            if !changed {
                debug!("k-means converged after {iteration} iterations");
                break;
            }

            for (c, centroid) in centroids.iter_mut().enumerate() {
                let members: Vec<&EmbeddingVector> = vectors
                    .iter()
                    .zip(&assignments)
                    .filter(|&(_, &a)| a == c)
                    .map(|(v, _)| v)
                    .collect();
                // A centroid with no members keeps its previous position.
                if !members.is_empty() {
                    *centroid = mean_vector(&members, dimension);
                }
            }
        }

        let mut groups = Vec::new();
        for c in 0..self.config.k {
            let members: Vec<&EmbeddingVector> = vectors
                .iter()
                .zip(&assignments)
                .filter(|&(_, &a)| a == c)
                .map(|(v, _)| v)
                .collect();
            if members.is_empty() {
                continue;
            }
            let centroid = mean_vector(&members, dimension);
            groups.push(self.finish_group(groups.len(), members, centroid)?);
        }
        Ok(groups)
    }

    fn singletons(&self, vectors: &[EmbeddingVector]) -> Vec<ClusterGroup> {
        vectors
            .iter()
            .enumerate()
            .map(|(id, vector)| ClusterGroup {
                id,
                pattern_ids: vec![vector.id.clone()],
                centroid: vector.embedding.clone(),
                average_intra_cluster_similarity: 1.0,
                most_representative_pattern: vector.id.clone(),
            })
            .collect()
    }

    fn finish_group(
        &self,
        id: usize,
        members: Vec<&EmbeddingVector>,
        centroid: Vec<f32>,
    ) -> Result<ClusterGroup> {
        let mut representative = members[0].id.clone();
        let mut best_similarity = f32::NEG_INFINITY;
        for member in &members {
            let similarity = cosine_similarity(&member.embedding, &centroid)?;
            if similarity > best_similarity {
                best_similarity = similarity;
                representative = member.id.clone();
            }
        }

        // Exact mean over all internal pairs, not an approximation.
        let intra = if members.len() < 2 {
            1.0
        } else {
            let mut sum = 0.0f64;
            let mut pairs = 0usize;
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    sum += cosine_similarity(&members[i].embedding, &members[j].embedding)? as f64;
                    pairs += 1;
                }
            }
            (sum / pairs as f64) as f32
        };

        Ok(ClusterGroup {
            id,
            pattern_ids: members.iter().map(|m| m.id.clone()).collect(),
            centroid,
            average_intra_cluster_similarity: intra,
            most_representative_pattern: representative,
        })
    }
}

fn mean_vector(members: &[&EmbeddingVector], dimension: usize) -> Vec<f32> {
    let mut mean = vec![0.0f32; dimension];
    for member in members {
        for (slot, value) in mean.iter_mut().zip(&member.embedding) {
            *slot += value;
        }
    }
    let count = members.len() as f32;
    for slot in &mut mean {
        *slot /= count;
    }
    mean
}

//! Similarity matrix construction and queries.

use ahash::AHashMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingVector;
use crate::error::{ProteaError, Result};
use crate::similarity::cosine::cosine_similarity;

/// Options controlling a matrix build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixOptions {
    /// Sparse mode drops entries with similarity below this value.
    pub threshold: f32,
    /// Omit sub-threshold entries instead of storing them.
    pub sparse: bool,
    /// Compute only the upper triangle and mirror it, halving comparisons.
    pub symmetric: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            sparse: false,
            symmetric: true,
        }
    }
}

impl MatrixOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sparse threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable sparse storage.
    pub fn sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    /// Enable or disable symmetric (upper triangle only) computation.
    pub fn symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }
}

/// One off-diagonal matrix entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    /// Row index.
    pub i: usize,
    /// Column index.
    pub j: usize,
    /// Id at the row index.
    pub id_a: String,
    /// Id at the column index.
    pub id_b: String,
    /// Cosine similarity of the pair.
    pub similarity: f32,
}

/// Aggregate statistics accumulated during a build.
///
/// Aggregates cover every computed off-diagonal pair, before sparse
/// filtering, so dense and sparse builds of the same input report the same
/// mean/max/min. Self-similarity is excluded throughout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixStatistics {
    /// Mean off-diagonal similarity.
    pub average_similarity: f32,
    /// Highest off-diagonal similarity.
    pub max_similarity: f32,
    /// Lowest off-diagonal similarity.
    pub min_similarity: f32,
    /// Fraction of off-diagonal pairs not materialized in storage.
    pub sparsity: f32,
    /// Unordered pairs successfully compared.
    pub computed_pairs: usize,
    /// Unordered pairs skipped due to dimension mismatches.
    pub skipped_pairs: usize,
}

/// A pairwise cosine-similarity matrix over a set of embedding vectors.
///
/// Self-similarity is `1.0` by construction and never stored or recomputed.
/// In sparse mode, lookups for omitted entries return `0.0`.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    index_by_id: AHashMap<String, usize>,
    entries: AHashMap<(usize, usize), f32>,
    options: MatrixOptions,
    statistics: MatrixStatistics,
}

impl SimilarityMatrix {
    /// Build a matrix from a set of vectors.
    ///
    /// Requires at least two vectors with unique ids. A dimension mismatch
    /// on one pair is logged and skipped; the remaining pairs complete and
    /// the skipped pair reads as `0.0`.
    pub fn build(vectors: &[EmbeddingVector], options: MatrixOptions) -> Result<Self> {
        if vectors.len() < 2 {
            return Err(ProteaError::insufficient_embeddings(format!(
                "matrix build requires at least 2 vectors, got {}",
                vectors.len()
            )));
        }
        if !options.threshold.is_finite() {
            return Err(ProteaError::invalid_argument(
                "matrix threshold must be finite",
            ));
        }

        let n = vectors.len();
        let mut index_by_id = AHashMap::with_capacity(n);
        for (i, vector) in vectors.iter().enumerate() {
            if index_by_id.insert(vector.id.clone(), i).is_some() {
                return Err(ProteaError::invalid_argument(format!(
                    "duplicate vector id '{}'",
                    vector.id
                )));
            }
        }

        let mut entries = AHashMap::new();
        let mut sum = 0.0f64;
        let mut max = f32::NEG_INFINITY;
        let mut min = f32::INFINITY;
        let mut computed_pairs = 0usize;
        let mut skipped_pairs = 0usize;
        let mut stored_pairs = 0usize;

        for i in 0..n {
            let start = if options.symmetric { i + 1 } else { 0 };
            for j in start..n {
                if i == j {
                    continue;
                }
                let sim =
                    match cosine_similarity(&vectors[i].embedding, &vectors[j].embedding) {
                        Ok(sim) => sim,
                        Err(ProteaError::DimensionMismatch { expected, actual }) => {
                            if i < j {
                                warn!(
                                    "skipping pair ('{}', '{}'): dimension mismatch {} vs {}",
                                    vectors[i].id, vectors[j].id, expected, actual
                                );
                                skipped_pairs += 1;
                            }
                            continue;
                        }
                        Err(err) => return Err(err),
                    };

                if i < j {
                    sum += sim as f64;
                    max = max.max(sim);
                    min = min.min(sim);
                    computed_pairs += 1;
                }

                if !options.sparse || sim >= options.threshold {
                    let key = if options.symmetric {
                        (i.min(j), i.max(j))
                    } else {
                        (i, j)
                    };
                    entries.insert(key, sim);
                    if i < j {
                        stored_pairs += 1;
                    }
                }
            }
        }

        let possible_pairs = n * (n - 1) / 2;
        let statistics = MatrixStatistics {
            average_similarity: if computed_pairs > 0 {
                (sum / computed_pairs as f64) as f32
            } else {
                0.0
            },
            max_similarity: if computed_pairs > 0 { max } else { 0.0 },
            min_similarity: if computed_pairs > 0 { min } else { 0.0 },
            sparsity: if possible_pairs > 0 {
                1.0 - stored_pairs as f32 / possible_pairs as f32
            } else {
                0.0
            },
            computed_pairs,
            skipped_pairs,
        };

        Ok(Self {
            ids: vectors.iter().map(|v| v.id.clone()).collect(),
            index_by_id,
            entries,
            options,
            statistics,
        })
    }

    /// The ids covered by this matrix, in input order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of ids covered.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the matrix covers no ids.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The options this matrix was built with.
    pub fn options(&self) -> &MatrixOptions {
        &self.options
    }

    /// Index of an id, if covered.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Similarity by index.
    ///
    /// The diagonal is `1.0` by construction. Omitted sparse entries and
    /// out-of-range indices read as `0.0`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        if i >= self.ids.len() || j >= self.ids.len() {
            return 0.0;
        }
        if i == j {
            return 1.0;
        }
        let key = if self.options.symmetric {
            (i.min(j), i.max(j))
        } else {
            (i, j)
        };
        self.entries.get(&key).copied().unwrap_or(0.0)
    }

    /// Similarity by id pair. `None` if either id is not covered.
    pub fn get_by_id(&self, a: &str, b: &str) -> Option<f32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.get(i, j))
    }

    /// All similarities for one id, sorted descending.
    ///
    /// Returns `None` for ids the matrix does not cover. The id itself is
    /// excluded.
    pub fn row(&self, id: &str) -> Option<Vec<SimilarityPair>> {
        let i = self.index_of(id)?;
        let mut row: Vec<SimilarityPair> = (0..self.ids.len())
            .filter(|&j| j != i)
            .map(|j| self.pair(i, j, self.get(i, j)))
            .collect();
        row.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Some(row)
    }

    /// The `k` highest-similarity stored off-diagonal pairs.
    ///
    /// Pairs are deduplicated under symmetry: `(i, j)` and `(j, i)` count
    /// once. Sparse-omitted entries never appear.
    pub fn top_pairs(&self, k: usize) -> Vec<SimilarityPair> {
        let mut pairs = self.stored_pairs();
        pairs.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (a.i, a.j).cmp(&(b.i, b.j)))
        });
        pairs.truncate(k);
        pairs
    }

    /// All stored off-diagonal entries, deduplicated under symmetry.
    pub fn stored_pairs(&self) -> Vec<SimilarityPair> {
        let mut deduped: AHashMap<(usize, usize), f32> =
            AHashMap::with_capacity(self.entries.len());
        for (&(i, j), &sim) in &self.entries {
            deduped.insert((i.min(j), i.max(j)), sim);
        }
        deduped
            .into_iter()
            .map(|((i, j), sim)| self.pair(i, j, sim))
            .collect()
    }

    /// Aggregate statistics from the build.
    pub fn statistics(&self) -> &MatrixStatistics {
        &self.statistics
    }

    fn pair(&self, i: usize, j: usize, similarity: f32) -> SimilarityPair {
        SimilarityPair {
            i,
            j,
            id_a: self.ids[i].clone(),
            id_b: self.ids[j].clone(),
            similarity,
        }
    }
}

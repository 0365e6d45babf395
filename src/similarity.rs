//! Pairwise cosine similarity and the similarity matrix.
//!
//! The matrix is the hub of the analysis path: the cluster engine and the
//! network builder both consume it. Dense and sparse representations share
//! one type; sparse builds simply omit sub-threshold entries.

pub mod cosine;
pub mod matrix;

pub use cosine::cosine_similarity;
pub use matrix::{MatrixOptions, MatrixStatistics, SimilarityMatrix, SimilarityPair};

//! Cosine similarity between embedding vectors.

use crate::error::{ProteaError, Result};
use crate::util::simd;

/// Compute the cosine similarity of two vectors.
///
/// Fails with [`ProteaError::DimensionMismatch`] when the lengths disagree.
/// Returns `0.0` when either vector has zero magnitude: cosine similarity
/// is undefined there and zero is the conservative "unrelated" default.
/// The result is clamped to `[-1.0, 1.0]` to absorb float rounding.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ProteaError::dimension_mismatch(a.len(), b.len()));
    }

    let denom = simd::magnitude(a) * simd::magnitude(b);
    if denom == 0.0 {
        return Ok(0.0);
    }

    Ok((simd::dot(a, b) / denom).clamp(-1.0, 1.0))
}

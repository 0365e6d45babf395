//! SIMD-friendly float kernels that power the similarity hot paths.

use wide::f32x8;

const LANES: usize = 8;

/// Dot product of two equal-length slices.
///
/// Processes eight lanes at a time with a scalar tail. Callers are
/// responsible for length agreement; unequal lengths are truncated to the
/// shorter slice, so validate dimensions before calling.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    let mut acc = f32x8::splat(0.0);

    let a_chunks = a.chunks_exact(LANES);
    let b_chunks = b.chunks_exact(LANES);
    let a_rem = a_chunks.remainder();
    let b_rem = b_chunks.remainder();

    for (ca, cb) in a_chunks.zip(b_chunks) {
        let va = f32x8::from([ca[0], ca[1], ca[2], ca[3], ca[4], ca[5], ca[6], ca[7]]);
        let vb = f32x8::from([cb[0], cb[1], cb[2], cb[3], cb[4], cb[5], cb[6], cb[7]]);
        acc += va * vb;
    }

    let mut sum = acc.reduce_add();
    for (x, y) in a_rem.iter().zip(b_rem.iter()) {
        sum += x * y;
    }
    sum
}

/// Euclidean magnitude of a slice.
pub fn magnitude(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

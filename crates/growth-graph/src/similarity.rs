//! Similarity functions for term sets and term vectors.
//!
//! Pure Rust implementations without external dependencies.

use std::collections::HashSet;

/// Size of the intersection of two term sets.
pub fn term_overlap(a: &HashSet<&str>, b: &HashSet<&str>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|t| large.contains(*t)).count()
}

/// Overlap normalized by the larger set: `|A ∩ B| / max(|A|, |B|)`.
///
/// Returns value in [0.0, 1.0]; two empty sets have similarity 0.0.
pub fn overlap_similarity(overlap: usize, len_a: usize, len_b: usize) -> f64 {
    let denom = len_a.max(len_b);
    if denom == 0 {
        return 0.0;
    }
    overlap as f64 / denom as f64
}

/// Squared Euclidean distance between two vectors.
///
/// # Panics
/// Panics if vectors have different dimensions.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same dimension");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Calculate the mean of multiple vectors.
///
/// Returns an empty vector for empty input.
pub fn calculate_centroid(vectors: &[&[f64]]) -> Vec<f64> {
    if vectors.is_empty() {
        return Vec::new();
    }

    let dim = vectors[0].len();
    let n = vectors.len() as f64;
    let mut centroid = vec![0.0f64; dim];

    for vector in vectors {
        assert_eq!(vector.len(), dim, "All vectors must have same dimension");
        for (i, &val) in vector.iter().enumerate() {
            centroid[i] += val;
        }
    }

    for val in centroid.iter_mut() {
        *val /= n;
    }

    centroid
}

/// Normalize a vector to unit length in place.
pub fn normalize(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for val in v.iter_mut() {
            *val /= norm;
        }
    }
}

//! Cosine similarity between embedding vectors.

/// Errors from vector comparison. A dimension mismatch is a programming
/// error in the caller, not a data condition, and always fails loudly.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Compute the cosine similarity between two vectors: dot(a,b) / (|a|*|b|).
///
/// If either vector has zero norm the result is 0.0. That is a convention,
/// not a limit: a zero vector has no direction to compare against, and
/// returning 0.0 keeps empty-text embeddings out of the top ranks without
/// poisoning a whole search.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a < f32::EPSILON || norm_b < f32::EPSILON {
        return Ok(0.0);
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok(dot / (norm_a * norm_b))
}

/// Compute L2 norm of a vector.
fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

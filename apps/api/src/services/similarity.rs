use ndarray::ArrayView1;

/// Cosine of the angle between two vectors of equal length, in [-1, 1].
///
/// A zero-magnitude vector has no direction and scores 0.
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");

    let magnitude = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if magnitude == 0.0 {
        return 0.0;
    }

    let score = a.dot(&b) / magnitude;
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}

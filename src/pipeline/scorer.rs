// ============================================================
// Layer 4 — Similarity Scorer
// ============================================================
// cos(a, b) = a·b / (‖a‖ ‖b‖)
//
// Accumulates in f64 so 4×1024-wide concat vectors do not lose
// precision, then clamps into [-1, 1] before narrowing. NaN or
// infinite components never produce a score.

use crate::domain::error::SimilarityError;

pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn score(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
        if a.len() != b.len() {
            return Err(SimilarityError::DimensionMismatch { left: a.len(), right: b.len() });
        }

        let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
        for (&x, &y) in a.iter().zip(b) {
            let (x, y) = (x as f64, y as f64);
            dot    += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(SimilarityError::DegenerateVector);
        }

        let cos = dot / (norm_a.sqrt() * norm_b.sqrt());
        if !cos.is_finite() {
            return Err(SimilarityError::DegenerateVector);
        }
        Ok(cos.clamp(-1.0, 1.0) as f32)
    }
}

// ============================================================
// Layer 4 — Layer Combiner
// ============================================================
// Merges the last four hidden layers of one token:
//
//   sum    → h[-1] + h[-2] + h[-3] + h[-4]        (H values)
//   concat → h[-1] ‖ h[-2] ‖ h[-3] ‖ h[-4]        (4H values)
//
// Reference: Devlin et al. (2019), feature-based approach, Table 7

use crate::domain::encoding::TokenEncoding;
use crate::domain::error::SimilarityError;
use crate::domain::options::CombineMode;

/// Number of trailing layers that take part in the combination.
pub const COMBINED_LAYERS: usize = 4;

pub struct LayerCombiner;

impl LayerCombiner {
    pub fn combine(
        encoding: &TokenEncoding,
        mode:     CombineMode,
    ) -> Result<Vec<f32>, SimilarityError> {
        let found = encoding.num_layers();
        if found < COMBINED_LAYERS {
            return Err(SimilarityError::InsufficientLayers { found });
        }

        // Most recent layer first
        let last: Vec<&Vec<f32>> = encoding.layers.iter().rev().take(COMBINED_LAYERS).collect();
        let hidden = last[0].len();
        if let Some(bad) = last.iter().find(|l| l.len() != hidden) {
            return Err(SimilarityError::DimensionMismatch { left: bad.len(), right: hidden });
        }

        let combined = match mode {
            CombineMode::Sum => {
                let mut acc = vec![0.0f32; hidden];
                for layer in &last {
                    for (a, v) in acc.iter_mut().zip(layer.iter()) {
                        *a += v;
                    }
                }
                acc
            }
            CombineMode::Concat => {
                let mut out = Vec::with_capacity(mode.output_dim(hidden));
                for layer in &last {
                    out.extend_from_slice(layer);
                }
                out
            }
        };
        debug_assert_eq!(combined.len(), mode.output_dim(hidden));
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_layers() -> TokenEncoding {
        // Layer l holds [l, 10l]
        TokenEncoding::new((0..6).map(|l| vec![l as f32, 10.0 * l as f32]).collect())
    }

    #[test]
    fn test_sum_uses_only_last_four() {
        let v = LayerCombiner::combine(&six_layers(), CombineMode::Sum).unwrap();
        // layers 2..=5
        assert_eq!(v, vec![14.0, 140.0]);
    }

    #[test]
    fn test_concat_is_most_recent_first() {
        let v = LayerCombiner::combine(&six_layers(), CombineMode::Concat).unwrap();
        assert_eq!(v, vec![5.0, 50.0, 4.0, 40.0, 3.0, 30.0, 2.0, 20.0]);
    }

    #[test]
    fn test_concat_width_is_four_times_sum() {
        let enc = six_layers();
        let s = LayerCombiner::combine(&enc, CombineMode::Sum).unwrap();
        let c = LayerCombiner::combine(&enc, CombineMode::Concat).unwrap();
        assert_eq!(c.len(), 4 * s.len());
    }

    #[test]
    fn test_fewer_than_four_layers_is_fatal() {
        let enc = TokenEncoding::new(vec![vec![1.0]; 3]);
        let err = LayerCombiner::combine(&enc, CombineMode::Sum).unwrap_err();
        assert_eq!(err, SimilarityError::InsufficientLayers { found: 3 });
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_ragged_layers_are_rejected() {
        let enc = TokenEncoding::new(vec![vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0], vec![1.0, 2.0]]);
        let err = LayerCombiner::combine(&enc, CombineMode::Concat).unwrap_err();
        assert_eq!(err, SimilarityError::DimensionMismatch { left: 1, right: 2 });
    }
}

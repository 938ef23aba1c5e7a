// ============================================================
// Layer 3 — Encoder Outputs
// ============================================================
// Plain-Rust views of what an encoder produces. No tensor
// types here: the ML layer copies its hidden states into a
// SentenceEncoding before handing them to the pipeline.
//
// Memory layout of SentenceEncoding.values:
//   [layer 0: token 0 (H floats), token 1, ...]
//   [layer 1: token 0, token 1, ...]
//   ...
// Layers run from the embedding output to the final block.

use crate::domain::error::SimilarityError;

/// Per-layer vectors of a single sub-token, embedding layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenEncoding {
    pub layers: Vec<Vec<f32>>,
}

impl TokenEncoding {
    pub fn new(layers: Vec<Vec<f32>>) -> Self {
        Self { layers }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}

/// Hidden states for every sub-token of one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceEncoding {
    values:      Vec<f32>,
    num_layers:  usize,
    num_tokens:  usize,
    hidden_size: usize,
}

impl SentenceEncoding {
    /// Wrap a dense `layers × tokens × hidden` buffer.
    pub fn from_dense(
        values:      Vec<f32>,
        num_layers:  usize,
        num_tokens:  usize,
        hidden_size: usize,
    ) -> Result<Self, SimilarityError> {
        let expected = num_layers * num_tokens * hidden_size;
        if values.len() != expected {
            return Err(SimilarityError::DimensionMismatch {
                left:  values.len(),
                right: expected,
            });
        }
        Ok(Self { values, num_layers, num_tokens, hidden_size })
    }

    /// Build from per-token layer stacks. All vectors must share a width.
    pub fn from_tokens(tokens: &[TokenEncoding]) -> Result<Self, SimilarityError> {
        let num_tokens = tokens.len();
        let num_layers = tokens.first().map_or(0, TokenEncoding::num_layers);
        let hidden_size = tokens
            .first()
            .and_then(|t| t.layers.first())
            .map_or(0, Vec::len);

        let mut values = vec![0.0; num_layers * num_tokens * hidden_size];
        for (t, token) in tokens.iter().enumerate() {
            if token.num_layers() != num_layers {
                return Err(SimilarityError::DimensionMismatch {
                    left:  token.num_layers(),
                    right: num_layers,
                });
            }
            for (l, vec) in token.layers.iter().enumerate() {
                if vec.len() != hidden_size {
                    return Err(SimilarityError::DimensionMismatch {
                        left:  vec.len(),
                        right: hidden_size,
                    });
                }
                let start = (l * num_tokens + t) * hidden_size;
                values[start..start + hidden_size].copy_from_slice(vec);
            }
        }
        Ok(Self { values, num_layers, num_tokens, hidden_size })
    }

    pub fn num_layers(&self) -> usize { self.num_layers }

    pub fn num_tokens(&self) -> usize { self.num_tokens }

    pub fn hidden_size(&self) -> usize { self.hidden_size }

    /// Extract the layer stack of the sub-token at `index`.
    pub fn token(&self, index: usize) -> Option<TokenEncoding> {
        if index >= self.num_tokens {
            return None;
        }
        let h = self.hidden_size;
        let layers = (0..self.num_layers)
            .map(|l| {
                let start = (l * self.num_tokens + index) * h;
                self.values[start..start + h].to_vec()
            })
            .collect();
        Some(TokenEncoding::new(layers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_layout_is_layer_major() {
        // 2 layers, 2 tokens, H = 1
        let enc = SentenceEncoding::from_dense(vec![1.0, 2.0, 3.0, 4.0], 2, 2, 1).unwrap();
        assert_eq!(enc.token(0).unwrap().layers, vec![vec![1.0], vec![3.0]]);
        assert_eq!(enc.token(1).unwrap().layers, vec![vec![2.0], vec![4.0]]);
        assert!(enc.token(2).is_none());
    }

    #[test]
    fn test_from_tokens_round_trips_single_token() {
        let a = TokenEncoding::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = TokenEncoding::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let enc = SentenceEncoding::from_tokens(&[a, b.clone()]).unwrap();
        assert_eq!(enc.num_layers(), 2);
        assert_eq!(enc.hidden_size(), 2);
        assert_eq!(enc.token(1).unwrap(), b);
    }

    #[test]
    fn test_dense_rejects_wrong_length() {
        let err = SentenceEncoding::from_dense(vec![0.0; 5], 2, 2, 1).unwrap_err();
        assert_eq!(err, SimilarityError::DimensionMismatch { left: 5, right: 4 });
    }
}

// Test doubles shared by the pipeline tests.

use std::cell::Cell;

use crate::domain::encoding::{SentenceEncoding, TokenEncoding};
use crate::domain::error::SimilarityError;
use crate::domain::options::TokenConventions;
use crate::domain::traits::Encoder;

/// Whitespace tokenizer with deterministic layer vectors.
///
/// Token `t`, layer `l` (both zero-based) maps to
/// `[(t + 1) * (l + 1), l - t]`, unless the token text is a
/// number, in which case every layer is `[n, n]`.
pub struct StubEncoder {
    pub num_layers:    usize,
    pub forward_calls: Cell<usize>,
    /// Any token equal to this string makes forward_encode fail.
    pub poison:        Option<String>,
}

impl StubEncoder {
    pub fn new(num_layers: usize) -> Self {
        Self { num_layers, forward_calls: Cell::new(0), poison: None }
    }

    pub fn poisoned(num_layers: usize, token: &str) -> Self {
        Self { poison: Some(token.to_string()), ..Self::new(num_layers) }
    }

    pub fn layer_vector(token: &str, t: usize, l: usize) -> Vec<f32> {
        match token.parse::<f32>() {
            Ok(n) => vec![n, n],
            Err(_) => vec![((t + 1) * (l + 1)) as f32, l as f32 - t as f32],
        }
    }
}

impl Encoder for StubEncoder {
    fn conventions(&self) -> TokenConventions {
        TokenConventions::WORD_PIECE
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, SimilarityError> {
        Ok(text.split_whitespace().map(String::from).collect())
    }

    fn forward_encode(&self, tokens: &[String]) -> Result<SentenceEncoding, SimilarityError> {
        self.forward_calls.set(self.forward_calls.get() + 1);
        if let Some(p) = &self.poison {
            if tokens.iter().any(|t| t == p) {
                return Err(SimilarityError::encoder_inference(format!("cannot encode '{p}'")));
            }
        }
        let per_token: Vec<TokenEncoding> = tokens
            .iter()
            .enumerate()
            .map(|(t, tok)| {
                TokenEncoding::new(
                    (0..self.num_layers).map(|l| Self::layer_vector(tok, t, l)).collect(),
                )
            })
            .collect();
        SentenceEncoding::from_tokens(&per_token)
    }
}

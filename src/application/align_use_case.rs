// ============================================================
// Layer 2 — AlignUseCase
// ============================================================
// Shows how one sentence is tokenized and which sub-token the
// configured similarity type lands on. Useful for checking an
// annotated corpus against the fixed offset table, since the
// `@` marker itself is not used for alignment.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::domain::options::{CombineMode, RunOptions};
use crate::domain::traits::Encoder;
use crate::ml::encoder::load_encoder;
use crate::pipeline::processor::SentencePairProcessor;

#[derive(Debug, Clone, Serialize)]
pub struct Alignment {
    pub tokens: Vec<String>,
    pub index:  usize,
    pub target: String,
}

pub struct AlignUseCase {
    sentence:        String,
    similarity_type: String,
    encoder_variant: String,
    model_dir:       PathBuf,
}

impl AlignUseCase {
    pub fn new(
        sentence:        impl Into<String>,
        similarity_type: impl Into<String>,
        encoder_variant: impl Into<String>,
        model_dir:       impl Into<PathBuf>,
    ) -> Self {
        Self {
            sentence:        sentence.into(),
            similarity_type: similarity_type.into(),
            encoder_variant: encoder_variant.into(),
            model_dir:       model_dir.into(),
        }
    }

    pub fn execute(&self) -> Result<Alignment> {
        // Fail on a bad similarity type before loading the model
        self.options()?;
        let encoder = load_encoder(&self.encoder_variant, &self.model_dir, false)
            .with_context(|| format!("Cannot load encoder from '{}'", self.model_dir.display()))?;
        self.align_with(encoder.as_ref())
    }

    pub fn align_with(&self, encoder: &dyn Encoder) -> Result<Alignment> {
        let processor = SentencePairProcessor::new(encoder, self.options()?);
        let (tokens, index) = processor.locate_target(&self.sentence)?;
        let target = tokens[index].clone();
        Ok(Alignment { tokens, index, target })
    }

    // Alignment does not depend on the combine mode.
    fn options(&self) -> Result<RunOptions> {
        Ok(RunOptions {
            position: self.similarity_type.parse()?,
            mode:     CombineMode::Sum,
            encoder:  self.encoder_variant.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::StubEncoder;

    #[test]
    fn test_reports_target_token() {
        let enc = StubEncoder::new(4);
        let alignment = AlignUseCase::new("The @man bought a car", "head", "stub", "unused")
            .align_with(&enc)
            .unwrap();
        assert_eq!(alignment.index, 2);
        assert_eq!(alignment.target, "man");
        assert_eq!(alignment.tokens.len(), 7);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let enc = StubEncoder::new(4);
        let err = AlignUseCase::new("@Hi", "dep-obj", "stub", "unused")
            .align_with(&enc)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}

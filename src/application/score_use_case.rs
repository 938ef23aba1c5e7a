// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Runs one scoring run end to end:
//
//   Step 1: Validate similarity type / combine method (Layer 3)
//   Step 2: Load tokenizer + encoder                  (Layer 5/6)
//   Step 3: Read the sentence pairs                   (Layer 2)
//   Step 4: Score every pair with progress            (Layer 4)
//
// Step 1 runs first so a misconfigured run aborts before any
// file or model is touched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::options::RunOptions;
use crate::domain::sentence_pair::SentencePair;
use crate::domain::traits::Encoder;
use crate::infra::progress::ConsoleProgress;
use crate::ml::encoder::load_encoder;
use crate::pipeline::batch::{BatchReport, CancellationToken};
use crate::pipeline::processor::SentencePairProcessor;

// ─── Scoring Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub pairs_path:      String,
    pub model_dir:       String,
    pub encoder_variant: String,
    pub similarity_type: String,
    pub combine_method:  String,
    pub verbose_encoder: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            pairs_path:      "data/pairs.json".to_string(),
            model_dir:       "models/bert-base-uncased".to_string(),
            encoder_variant: "bert-base-uncased".to_string(),
            similarity_type: "head".to_string(),
            combine_method:  "sum".to_string(),
            verbose_encoder: false,
        }
    }
}

impl ScoreConfig {
    pub fn run_options(&self) -> Result<RunOptions> {
        let options = RunOptions::parse(
            &self.similarity_type,
            &self.combine_method,
            self.encoder_variant.as_str(),
        )?;
        Ok(options)
    }
}

// ─── ScoreUseCase ─────────────────────────────────────────────────────────────
pub struct ScoreUseCase {
    config: ScoreConfig,
}

impl ScoreUseCase {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Load the configured encoder and score every pair.
    pub fn execute(&self) -> Result<BatchReport> {
        let cfg = &self.config;

        // ── Step 1: Validate options ──────────────────────────────────────────
        let options = cfg.run_options()?;
        tracing::info!("Run: {}", options.label());

        // ── Step 2: Load encoder ──────────────────────────────────────────────
        let encoder = load_encoder(&cfg.encoder_variant, Path::new(&cfg.model_dir), cfg.verbose_encoder)
            .with_context(|| format!("Cannot load encoder from '{}'", cfg.model_dir))?;

        // ── Steps 3–4: Read pairs and score ───────────────────────────────────
        self.execute_with(encoder.as_ref())
    }

    /// Read the pairs and score them with an already-loaded encoder.
    pub fn execute_with(&self, encoder: &dyn Encoder) -> Result<BatchReport> {
        let options = self.config.run_options()?;
        let pairs   = read_pairs(Path::new(&self.config.pairs_path))?;
        tracing::info!("Read {} sentence pairs from '{}'", pairs.len(), self.config.pairs_path);
        score_pairs(encoder, options, &pairs)
    }
}

fn score_pairs(
    encoder: &dyn Encoder,
    options: RunOptions,
    pairs:   &[SentencePair],
) -> Result<BatchReport> {
    let processor = SentencePairProcessor::new(encoder, options);
    let report = processor.process_all(pairs, &ConsoleProgress, &CancellationToken::new())?;
    Ok(report)
}

/// Read `[["sentence 1", "sentence 2"], ...]`.
pub fn read_pairs(path: &Path) -> Result<Vec<SentencePair>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read pairs from '{}'", path.display()))?;
    let raw: Vec<(String, String)> = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a JSON array of sentence pairs", path.display()))?;
    Ok(raw.into_iter().map(SentencePair::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SimilarityError;
    use crate::pipeline::test_support::StubEncoder;

    fn config_with(pairs_path: &Path, similarity_type: &str) -> ScoreConfig {
        ScoreConfig {
            pairs_path:      pairs_path.display().to_string(),
            similarity_type: similarity_type.to_string(),
            ..ScoreConfig::default()
        }
    }

    #[test]
    fn test_invalid_similarity_type_aborts_before_io() {
        let enc = StubEncoder::new(4);
        let use_case = ScoreUseCase::new(config_with(Path::new("/does/not/exist.json"), "subject"));

        let err = use_case.execute_with(&enc).unwrap_err();

        assert_eq!(
            err.downcast_ref::<SimilarityError>(),
            Some(&SimilarityError::InvalidPositionSpec("subject".into()))
        );
        assert_eq!(enc.forward_calls.get(), 0);
    }

    #[test]
    fn test_scores_pairs_from_json_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        std::fs::write(&path, r#"[["A B @C D", "W X @Y Z"], ["@Q", "A B @C D"]]"#).unwrap();

        let enc    = StubEncoder::new(4);
        let report = ScoreUseCase::new(config_with(&path, "dep-obj")).execute_with(&enc).unwrap();

        assert_eq!(report.label, "bert-base-uncased-dep-obj-sum");
        assert_eq!(report.scored.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
    }

    #[test]
    fn test_malformed_pairs_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        std::fs::write(&path, r#"{"not": "pairs"}"#).unwrap();
        assert!(read_pairs(&path).is_err());
    }
}

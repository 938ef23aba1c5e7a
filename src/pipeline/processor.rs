// ============================================================
// Layer 4 — Sentence Pair Processor
// ============================================================
// Orchestrates one pair end to end:
//
//   raw sentence ──► SentencePreprocessor  strip @, wrap markers
//                ──► Encoder::tokenize     sub-token strings
//                ──► WordAligner           index of target piece
//                ──► Encoder::forward      every layer, every token
//                ──► LayerCombiner         one vector
//
// `embed_sentence` runs that chain for a single sentence and is
// called once per side of the pair; SimilarityScorer turns the
// two vectors into a score.
//
// Batch policy:
//   recoverable error → pair recorded as skipped, batch continues
//   fatal error       → whole batch aborts

use crate::domain::error::SimilarityError;
use crate::domain::options::RunOptions;
use crate::domain::sentence_pair::{marker_count, SentencePair};
use crate::domain::traits::{Encoder, ProgressReporter};
use crate::pipeline::aligner::WordAligner;
use crate::pipeline::batch::{BatchReport, CancellationToken, ScoredPair, SkippedPair};
use crate::pipeline::combiner::LayerCombiner;
use crate::pipeline::preprocessor::SentencePreprocessor;
use crate::pipeline::scorer::SimilarityScorer;

pub struct SentencePairProcessor<'a, E: Encoder + ?Sized> {
    encoder:      &'a E,
    preprocessor: SentencePreprocessor,
    aligner:      WordAligner,
    options:      RunOptions,
}

impl<'a, E: Encoder + ?Sized> SentencePairProcessor<'a, E> {
    pub fn new(encoder: &'a E, options: RunOptions) -> Self {
        let conventions = encoder.conventions();
        Self {
            encoder,
            preprocessor: SentencePreprocessor::new(conventions),
            aligner:      WordAligner::new(conventions),
            options,
        }
    }

    /// Validate textual options and build a processor.
    /// Nothing touches the encoder until validation has passed.
    pub fn from_names(
        encoder:         &'a E,
        similarity_type: &str,
        combine_method:  &str,
        encoder_name:    &str,
    ) -> Result<Self, SimilarityError> {
        let options = RunOptions::parse(similarity_type, combine_method, encoder_name)?;
        Ok(Self::new(encoder, options))
    }

    /// Tokenize one raw sentence and find its target sub-token.
    pub fn locate_target(&self, sentence: &str) -> Result<(Vec<String>, usize), SimilarityError> {
        let text   = self.preprocessor.prepare(sentence);
        let tokens = self.encoder.tokenize(&text)?;
        let index  = self.aligner.locate(&tokens, self.options.position.word_offset())?;
        Ok((tokens, index))
    }

    /// The combined word embedding of the target word in `sentence`.
    pub fn embed_sentence(&self, sentence: &str) -> Result<Vec<f32>, SimilarityError> {
        let markers = marker_count(sentence);
        if markers != 1 {
            tracing::warn!("Expected one target marker, found {} in '{}'", markers, sentence);
        }

        let (tokens, index) = self.locate_target(sentence)?;
        let encoding = self.encoder.forward_encode(&tokens)?;
        if encoding.num_tokens() != tokens.len() {
            return Err(SimilarityError::encoder_inference(format!(
                "encoder returned {} token encodings for {} tokens",
                encoding.num_tokens(),
                tokens.len()
            )));
        }

        let token = encoding.token(index).ok_or_else(|| {
            SimilarityError::encoder_inference(format!("no encoding for token {index}"))
        })?;

        tracing::debug!("Target '{}' at sub-token {} of {:?}", tokens[index], index, tokens);
        LayerCombiner::combine(&token, self.options.mode)
    }

    /// Cosine similarity of the target word across both sentences.
    pub fn process(&self, pair: &SentencePair) -> Result<f32, SimilarityError> {
        let [first, second] = pair.sentences();
        let a = self.embed_sentence(first)?;
        let b = self.embed_sentence(second)?;
        SimilarityScorer::score(&a, &b)
    }

    /// Score every pair in order, reporting progress after each one.
    pub fn process_all(
        &self,
        pairs:    &[SentencePair],
        progress: &dyn ProgressReporter,
        cancel:   &CancellationToken,
    ) -> Result<BatchReport, SimilarityError> {
        let total      = pairs.len();
        let mut report = BatchReport::new(self.options.label(), total);
        tracing::info!("Scoring {} pairs ({})", total, report.label);

        for (index, pair) in pairs.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!("Cancelled after {} of {} pairs", index, total);
                report.cancelled = true;
                break;
            }

            match self.process(pair) {
                Ok(score) => {
                    tracing::debug!("Pair {} scored {:.6}", index, score);
                    report.scored.push(ScoredPair { index, score });
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        "Skipping pair {} ('{}' / '{}'): {}",
                        index, pair.first, pair.second, e
                    );
                    report.skipped.push(SkippedPair { index, reason: e.to_string() });
                }
                Err(e) => {
                    progress.finish();
                    tracing::error!("Aborting batch at pair {}: {}", index, e);
                    return Err(e);
                }
            }

            progress.report(index + 1, total);
        }
        progress.finish();

        tracing::info!(
            "Scored {} pairs, skipped {}",
            report.scored.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

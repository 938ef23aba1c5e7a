// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline talks to the model and to the progress display
// only through these traits, so it can be driven by the burn
// encoder in production and by a stub in tests:
//
//   Encoder          — tokenize + forward pass, plus the token
//                      conventions of its model family
//   ProgressReporter — receives (completed, total) after each
//                      pair of a batch, then `finish` once
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)

use crate::domain::encoding::SentenceEncoding;
use crate::domain::error::SimilarityError;
use crate::domain::options::TokenConventions;

// ─── Encoder ──────────────────────────────────────────────────────────────────
/// A pretrained sequence model used for inference only.
///
/// Implementations:
///   - BurnEncoder → tokenizers + burn transformer (ml layer)
///   - StubEncoder → fixed vectors, for tests
pub trait Encoder {
    /// Sentence markers and sub-word scheme of this model family.
    fn conventions(&self) -> TokenConventions;

    /// Split already-wrapped text into sub-token strings.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, SimilarityError>;

    /// Run the model over `tokens` and return every hidden layer
    /// for every sub-token.
    fn forward_encode(&self, tokens: &[String]) -> Result<SentenceEncoding, SimilarityError>;
}

// ─── ProgressReporter ─────────────────────────────────────────────────────────
/// Observer for batch progress. Not part of the data contract.
pub trait ProgressReporter {
    fn report(&self, completed: usize, total: usize);

    /// Called once when the batch stops, whether it completed,
    /// was cancelled or aborted.
    fn finish(&self) {}
}

/// Any `Fn(completed, total)` closure is a reporter.
impl<F: Fn(usize, usize)> ProgressReporter for F {
    fn report(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Discards all progress updates.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _completed: usize, _total: usize) {}
}

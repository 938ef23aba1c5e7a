// ============================================================
// Layer 4 — Word Aligner
// ============================================================
// Maps a word offset to the index of the word's first sub-token.
//
// Sub-word tokenizers split rare words into pieces:
//
//   "[CLS] the runner ran [SEP]"
//     → [CLS]  the  run  ##ner  ran  [SEP]
//   word:  0    1    2           3     4
//   index: 0    1    2    3      4     5
//
// Continuation pieces (##ner) never start a new word, but they
// still occupy a slot in the encoder output, so the returned
// index is a position in the full sub-token sequence.

use crate::domain::error::SimilarityError;
use crate::domain::options::TokenConventions;

pub struct WordAligner {
    conventions: TokenConventions,
}

impl WordAligner {
    pub fn new(conventions: TokenConventions) -> Self {
        Self { conventions }
    }

    /// Sub-token index of the first piece of word `target_offset`.
    pub fn locate(
        &self,
        tokens:        &[String],
        target_offset: usize,
    ) -> Result<usize, SimilarityError> {
        let mut word = 0usize;
        for (index, token) in tokens.iter().enumerate() {
            if self.conventions.is_continuation(token, index) {
                continue;
            }
            if word == target_offset {
                return Ok(index);
            }
            word += 1;
        }
        Err(SimilarityError::AlignmentOutOfRange {
            offset: target_offset,
            words:  word,
        })
    }

    /// Number of word-initial sub-tokens in `tokens`.
    pub fn word_count(&self, tokens: &[String]) -> usize {
        tokens
            .iter()
            .enumerate()
            .filter(|(i, t)| !self.conventions.is_continuation(t, *i))
            .count()
    }
}

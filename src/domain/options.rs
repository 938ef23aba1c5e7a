// ============================================================
// Layer 3 — Run Options
// ============================================================
// The closed vocabularies that configure a scoring run:
//
//   TargetPosition — which word to compare (fixed offset table)
//   CombineMode    — how the last four layers are merged
//   EncoderVariant — which model family to load, and the
//                    conventions that family follows
//
// All parsing happens here, before any encoder is touched,
// so a typo in the configuration aborts the run up front.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::SimilarityError;

// ─── TargetPosition ───────────────────────────────────────────────────────────
/// Which word of the sentence is the comparison target.
///
/// Offsets count word-initial sub-tokens from the start of the
/// wrapped sequence, so the begin-of-sentence marker is word 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPosition {
    Head,
    DepSubj,
    DepObj,
    Dep,
}

impl TargetPosition {
    /// Zero-based word offset for this position.
    pub fn word_offset(self) -> usize {
        match self {
            Self::Head => 2,
            Self::DepSubj => 1,
            Self::DepObj => 3,
            Self::Dep => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::DepSubj => "dep-subj",
            Self::DepObj => "dep-obj",
            Self::Dep => "dep",
        }
    }
}

impl FromStr for TargetPosition {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(Self::Head),
            "dep-subj" => Ok(Self::DepSubj),
            "dep-obj" => Ok(Self::DepObj),
            "dep" => Ok(Self::Dep),
            other => Err(SimilarityError::InvalidPositionSpec(other.to_string())),
        }
    }
}

impl fmt::Display for TargetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── CombineMode ──────────────────────────────────────────────────────────────
/// How the last four layers of a token are merged into one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineMode {
    /// Elementwise sum → H values
    Sum,
    /// Most recent layer first → 4H values
    Concat,
}

impl CombineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Concat => "concat",
        }
    }

    /// Width of the combined vector for a hidden size `h`.
    pub fn output_dim(self, hidden_size: usize) -> usize {
        match self {
            Self::Sum => hidden_size,
            Self::Concat => 4 * hidden_size,
        }
    }
}

impl FromStr for CombineMode {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Self::Sum),
            "concat" => Ok(Self::Concat),
            other => Err(SimilarityError::UnsupportedCombineMethod(other.to_string())),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── SubwordScheme / TokenConventions ─────────────────────────────────────────
/// How a tokenizer marks the pieces of a split word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubwordScheme {
    /// Continuation pieces carry a `##` prefix (BERT, DistilBERT).
    WordPiece,
    /// Word-initial pieces carry a `Ġ` prefix (RoBERTa byte-level BPE).
    ByteLevel,
}

/// Sentence markers and sub-word scheme of one encoder family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConventions {
    pub begin_marker: &'static str,
    pub end_marker:   &'static str,
    pub scheme:       SubwordScheme,
}

impl TokenConventions {
    pub const WORD_PIECE: Self = Self {
        begin_marker: "[CLS]",
        end_marker:   "[SEP]",
        scheme:       SubwordScheme::WordPiece,
    };

    pub const BYTE_LEVEL: Self = Self {
        begin_marker: "<s>",
        end_marker:   "</s>",
        scheme:       SubwordScheme::ByteLevel,
    };

    /// True if `token`, found at `position` in the sequence, continues
    /// the previous word instead of starting a new one.
    pub fn is_continuation(&self, token: &str, position: usize) -> bool {
        if position == 0 || token == self.begin_marker || token == self.end_marker {
            return false;
        }
        match self.scheme {
            SubwordScheme::WordPiece => token.starts_with("##"),
            SubwordScheme::ByteLevel => !token.starts_with('Ġ'),
        }
    }
}

// ─── EncoderVariant ───────────────────────────────────────────────────────────
/// The model families this tool knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncoderVariant {
    Bert,
    Roberta,
    DistilBert,
}

impl EncoderVariant {
    /// Resolve a pretrained identifier to its family.
    /// Unknown identifiers fall back to the BERT family.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "roberta-base" => Self::Roberta,
            "distilbert-base-uncased" => Self::DistilBert,
            _ => Self::Bert,
        }
    }

    pub fn conventions(self) -> TokenConventions {
        match self {
            Self::Bert | Self::DistilBert => TokenConventions::WORD_PIECE,
            Self::Roberta => TokenConventions::BYTE_LEVEL,
        }
    }

    /// Position of the per-layer hidden-state stack among the raw
    /// output groups of the model.
    ///
    /// BERT and RoBERTa return (last_hidden, pooled, hidden_states);
    /// DistilBERT has no pooler and returns (last_hidden, hidden_states).
    pub fn hidden_states_group_index(self) -> usize {
        match self {
            Self::Bert | Self::Roberta => 2,
            Self::DistilBert => 1,
        }
    }

    pub fn has_pooler(self) -> bool {
        !matches!(self, Self::DistilBert)
    }

    /// Number of token-type embeddings (0 = none).
    pub fn type_vocab_size(self) -> usize {
        match self {
            Self::Bert => 2,
            Self::Roberta => 1,
            Self::DistilBert => 0,
        }
    }

    /// First position id used by the position embedding table.
    /// RoBERTa reserves ids 0 and 1 (padding index + 1).
    pub fn position_offset(self) -> usize {
        match self {
            Self::Roberta => 2,
            Self::Bert | Self::DistilBert => 0,
        }
    }
}

// ─── RunOptions ───────────────────────────────────────────────────────────────
/// The validated configuration of one scoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub position: TargetPosition,
    pub mode:     CombineMode,
    pub encoder:  String,
}

impl RunOptions {
    /// Validate the two textual options. Fails on the first unknown name.
    pub fn parse(
        similarity_type: &str,
        combine_method:  &str,
        encoder:         impl Into<String>,
    ) -> Result<Self, SimilarityError> {
        Ok(Self {
            position: similarity_type.parse()?,
            mode:     combine_method.parse()?,
            encoder:  encoder.into(),
        })
    }

    /// `{encoder}-{similarity_type}-{combine_method}`
    pub fn label(&self) -> String {
        format!("{}-{}-{}", self.encoder, self.position, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_table() {
        assert_eq!(TargetPosition::Head.word_offset(), 2);
        assert_eq!(TargetPosition::DepSubj.word_offset(), 1);
        assert_eq!(TargetPosition::DepObj.word_offset(), 3);
        assert_eq!(TargetPosition::Dep.word_offset(), 1);
    }

    #[test]
    fn test_unknown_similarity_type_is_rejected() {
        let err = "subject".parse::<TargetPosition>().unwrap_err();
        assert_eq!(err, SimilarityError::InvalidPositionSpec("subject".into()));
    }

    #[test]
    fn test_unknown_combine_method_is_rejected() {
        let err = RunOptions::parse("head", "mean", "bert-base-uncased").unwrap_err();
        assert_eq!(err, SimilarityError::UnsupportedCombineMethod("mean".into()));
    }

    #[test]
    fn test_label_matches_run_naming() {
        let opts = RunOptions::parse("dep-obj", "concat", "roberta-base").unwrap();
        assert_eq!(opts.label(), "roberta-base-dep-obj-concat");
    }

    #[test]
    fn test_concat_is_four_times_sum() {
        for h in [2, 768, 1024] {
            assert_eq!(CombineMode::Concat.output_dim(h), 4 * CombineMode::Sum.output_dim(h));
        }
    }

    #[test]
    fn test_variant_resolution_falls_back_to_bert() {
        assert_eq!(EncoderVariant::from_identifier("roberta-base"), EncoderVariant::Roberta);
        assert_eq!(
            EncoderVariant::from_identifier("distilbert-base-uncased"),
            EncoderVariant::DistilBert
        );
        assert_eq!(EncoderVariant::from_identifier("bert-large-cased"), EncoderVariant::Bert);
        assert_eq!(EncoderVariant::from_identifier("something-else"), EncoderVariant::Bert);
    }

    #[test]
    fn test_hidden_state_group_follows_pooler() {
        for v in [EncoderVariant::Bert, EncoderVariant::Roberta, EncoderVariant::DistilBert] {
            let expected = if v.has_pooler() { 2 } else { 1 };
            assert_eq!(v.hidden_states_group_index(), expected);
        }
    }

    #[test]
    fn test_word_piece_continuations() {
        let c = TokenConventions::WORD_PIECE;
        assert!(!c.is_continuation("[CLS]", 0));
        assert!(!c.is_continuation("run", 1));
        assert!(c.is_continuation("##ner", 2));
        assert!(!c.is_continuation("[SEP]", 3));
    }

    #[test]
    fn test_byte_level_continuations() {
        let c = TokenConventions::BYTE_LEVEL;
        assert!(!c.is_continuation("<s>", 0));
        assert!(!c.is_continuation("ĠThe", 1));
        assert!(c.is_continuation("ner", 2));
        assert!(!c.is_continuation("</s>", 3));
    }
}

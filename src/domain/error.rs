// ============================================================
// Layer 3 — Error Types
// ============================================================
// Every failure the scoring core can signal. Two families:
//
//   Fatal       — configuration or encoder problems that make
//                 the whole run meaningless (abort before or
//                 during the batch)
//   Recoverable — problems local to one sentence pair; the
//                 pair is skipped and the batch carries on
//
// `is_recoverable()` is the single place that decides which
// family a variant belongs to.

use thiserror::Error;

/// The phase in which the encoder failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderStage {
    /// Loading weights, config or vocabulary
    Load,
    /// A single tokenize / forward call
    Inference,
}

impl std::fmt::Display for EncoderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Inference => f.write_str("inference"),
        }
    }
}

/// Errors raised by alignment, layer combination, scoring and encoding.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimilarityError {
    /// similarity_type is not one of head, dep-subj, dep-obj, dep.
    #[error("Invalid similarity type '{0}' (expected one of: head, dep-subj, dep-obj, dep)")]
    InvalidPositionSpec(String),

    /// combine_method is not one of sum, concat.
    #[error("Unsupported combine method '{0}' (expected one of: sum, concat)")]
    UnsupportedCombineMethod(String),

    /// The sentence has fewer words than the target offset requires.
    #[error("Target word offset {offset} is out of range: sentence has {words} words")]
    AlignmentOutOfRange {
        /// Requested zero-based word offset
        offset: usize,
        /// Word-initial sub-tokens actually present
        words: usize,
    },

    /// A combined embedding has zero norm, cosine is undefined.
    #[error("Degenerate vector: cosine similarity is undefined for a zero-norm or non-finite embedding")]
    DegenerateVector,

    /// The encoder could not produce an encoding.
    #[error("Encoder failure during {stage}: {message}")]
    EncoderFailure {
        stage: EncoderStage,
        message: String,
    },

    /// The encoder exposes fewer than four layers.
    #[error("Encoder exposes {found} layers, at least 4 are required")]
    InsufficientLayers { found: usize },

    /// Two vectors that must share a width do not.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

impl SimilarityError {
    pub fn encoder_load(message: impl Into<String>) -> Self {
        Self::EncoderFailure {
            stage: EncoderStage::Load,
            message: message.into(),
        }
    }

    pub fn encoder_inference(message: impl Into<String>) -> Self {
        Self::EncoderFailure {
            stage: EncoderStage::Inference,
            message: message.into(),
        }
    }

    /// True when the failure is local to a single pair and the batch
    /// should record it and continue.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AlignmentOutOfRange { .. } | Self::DegenerateVector => true,
            Self::EncoderFailure { stage, .. } => *stage == EncoderStage::Inference,
            Self::InvalidPositionSpec(_)
            | Self::UnsupportedCombineMethod(_)
            | Self::InsufficientLayers { .. }
            | Self::DimensionMismatch { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability_policy() {
        assert!(SimilarityError::AlignmentOutOfRange { offset: 3, words: 2 }.is_recoverable());
        assert!(SimilarityError::DegenerateVector.is_recoverable());
        assert!(SimilarityError::encoder_inference("oom").is_recoverable());

        assert!(!SimilarityError::encoder_load("missing weights").is_recoverable());
        assert!(!SimilarityError::InvalidPositionSpec("subject".into()).is_recoverable());
        assert!(!SimilarityError::UnsupportedCombineMethod("mean".into()).is_recoverable());
        assert!(!SimilarityError::InsufficientLayers { found: 3 }.is_recoverable());
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let e = SimilarityError::InvalidPositionSpec("subject".into());
        assert!(e.to_string().contains("'subject'"));

        let e = SimilarityError::encoder_load("no tokenizer.json");
        assert_eq!(e.to_string(), "Encoder failure during load: no tokenizer.json");
    }
}

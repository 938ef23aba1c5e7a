// ============================================================
// Layer 4 — Scoring Pipeline
// ============================================================
// Turns a marked sentence pair into one similarity score:
//
//   SentencePair
//       │
//       ▼
//   SentencePreprocessor → strip @, wrap with [CLS] … [SEP]
//       │
//       ▼
//   Encoder (trait)      → sub-tokens, then every hidden layer
//       │
//       ▼
//   WordAligner          → sub-token index of the target word
//       │
//       ▼
//   LayerCombiner        → sum or concat of the last 4 layers
//       │
//       ▼
//   SimilarityScorer     → cosine similarity
//
// SentencePairProcessor wires the steps together and owns the
// batch policy (skip recoverable failures, abort on fatal ones).
//
// Reference: Rust Book §13 (Iterators and Closures)

/// First sub-token of the target word
pub mod aligner;

/// Batch report and cancellation
pub mod batch;

/// Last-four-layer combination
pub mod combiner;

/// Marker stripping and sentence wrapping
pub mod preprocessor;

/// Per-pair and batch orchestration
pub mod processor;

/// Cosine similarity
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types and traits that define the scoring problem.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - NO tokenizer crate types
//
// Everything here can be unit tested without a model on disk.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Encoder outputs as plain vectors
pub mod encoding;

// Typed errors with a recoverable / fatal split
pub mod error;

// Target position, combine mode, encoder variant
pub mod options;

// A pair of marked sentences
pub mod sentence_pair;

// Encoder and progress abstractions
pub mod traits;

// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the filesystem or the
// terminal:
//
//   encoder_store.rs   — Encoder config + weights
//                        Reads encoder_config.json and the
//                        CompactRecorder record, rebuilds the
//                        model with the saved architecture.
//
//   tokenizer_store.rs — Pretrained tokenizer.json loading
//
//   progress.rs        — Console progress line on stderr
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Encoder config and weight loading
pub mod encoder_store;

/// Tokenizer loading
pub mod tokenizer_store;

/// Progress display
pub mod progress;

// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: validate options, load the
// encoder, feed sentences to the pipeline.
//
// Rules for this layer:
//   - No tensor code here (Layer 5)
//   - No printing here (Layer 1)
//   - Errors are anyhow::Result with context
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Score a corpus of sentence pairs
pub mod score_use_case;

// Inspect the alignment of one sentence
pub mod align_use_case;

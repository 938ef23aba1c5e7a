// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn and tokenizer code lives here. Other layers see the
// model only through the domain `Encoder` trait.
//
//   model.rs   — BERT-family transformer encoder
//                • Token, position and token-type embeddings
//                • Post-norm self-attention blocks (GELU FFN)
//                • Optional tanh pooler over [CLS]
//                • Returns every hidden layer, not just the last
//
//   encoder.rs — Adapter + factory
//                Loads a model directory, maps sub-tokens to
//                ids, runs inference, selects the hidden-state
//                output group for the encoder variant
//
// Reference: Burn Book §3 (Building Blocks)
//            Devlin et al. (2019) BERT
//            Liu et al. (2019) RoBERTa

/// Transformer encoder architecture
pub mod model;

/// Encoder trait implementation and loader
pub mod encoder;

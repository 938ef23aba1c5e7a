// ============================================================
// Layer 5 — Burn Encoder Adapter
// ============================================================
// Implements the domain `Encoder` trait on top of a Hugging Face
// tokenizer and the burn BertEncoder.
//
// Forward pass:
//   sub-token strings ──► vocabulary ids ──► [1, seq_len] tensor
//   ──► model.forward ──► raw output groups
//   ──► group `hidden_states_group_index` (fixed per variant)
//   ──► cat along dim 0 → [layers, seq_len, hidden]
//   ──► SentenceEncoding (plain f32, layer-major)
//
// The model runs on a non-autodiff backend: no gradients and no
// dropout are ever involved.

use std::path::Path;

use burn::{prelude::*, tensor::TensorData};
use tokenizers::Tokenizer;

use crate::domain::encoding::SentenceEncoding;
use crate::domain::error::SimilarityError;
use crate::domain::options::{EncoderVariant, TokenConventions};
use crate::domain::traits::Encoder;
use crate::infra::{encoder_store::EncoderStore, tokenizer_store::TokenizerStore};
use crate::ml::model::{BertEncoder, BertEncoderConfig, EncoderOutput, OutputGroup};

type InferBackend = burn::backend::Wgpu;

pub struct BurnEncoder<B: Backend> {
    model:            BertEncoder<B>,
    tokenizer:        Tokenizer,
    variant:          EncoderVariant,
    max_sequence_len: usize,
    device:           B::Device,
    verbose:          bool,
}

impl<B: Backend> BurnEncoder<B> {
    pub fn new(
        model:            BertEncoder<B>,
        tokenizer:        Tokenizer,
        variant:          EncoderVariant,
        max_sequence_len: usize,
        device:           B::Device,
    ) -> Self {
        Self { model, tokenizer, variant, max_sequence_len, device, verbose: false }
    }

    /// Log every token sequence and its ids at info level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn variant(&self) -> EncoderVariant {
        self.variant
    }

    fn token_ids(&self, tokens: &[String]) -> Result<Vec<i64>, SimilarityError> {
        tokens
            .iter()
            .map(|t| {
                self.tokenizer
                    .token_to_id(t)
                    .map(i64::from)
                    .ok_or_else(|| {
                        SimilarityError::encoder_inference(format!("token '{t}' is not in the vocabulary"))
                    })
            })
            .collect()
    }

    fn hidden_state_stack(&self, output: EncoderOutput<B>) -> Result<Vec<Tensor<B, 3>>, SimilarityError> {
        let index       = self.variant.hidden_states_group_index();
        let group_count = output.groups.len();
        match output.groups.into_iter().nth(index) {
            Some(OutputGroup::HiddenStates(stack)) if !stack.is_empty() => Ok(stack),
            Some(_) => Err(SimilarityError::encoder_inference(format!(
                "output group {index} is not a hidden-state stack"
            ))),
            None => Err(SimilarityError::encoder_inference(format!(
                "model returned {group_count} output groups, expected group {index}"
            ))),
        }
    }
}

impl<B: Backend> Encoder for BurnEncoder<B> {
    fn conventions(&self) -> TokenConventions {
        self.variant.conventions()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, SimilarityError> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| SimilarityError::encoder_inference(format!("tokenise: {e}")))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn forward_encode(&self, tokens: &[String]) -> Result<SentenceEncoding, SimilarityError> {
        let seq_len = tokens.len();
        if seq_len == 0 || seq_len > self.max_sequence_len {
            return Err(SimilarityError::encoder_inference(format!(
                "sequence of {seq_len} tokens, supported range is 1..={}",
                self.max_sequence_len
            )));
        }

        let ids = self.token_ids(tokens)?;
        if self.verbose {
            tracing::info!("Encoding {:?} as {:?}", tokens, ids);
        }

        let input = Tensor::<B, 1, Int>::from_data(TensorData::new(ids, [seq_len]), &self.device)
            .unsqueeze::<2>();
        let stack = self.hidden_state_stack(self.model.forward(input))?;

        let num_layers      = stack.len();
        let [_, _, hidden]  = stack[0].dims();
        let values = Tensor::cat(stack, 0)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| SimilarityError::encoder_inference(format!("read hidden states: {e:?}")))?;

        SentenceEncoding::from_dense(values, num_layers, seq_len, hidden)
    }
}

/// Load config, weights and tokenizer from `model_dir` onto `device`.
pub fn load_encoder_on<B: Backend>(
    identifier: &str,
    model_dir:  &Path,
    device:     B::Device,
) -> Result<BurnEncoder<B>, SimilarityError> {
    let variant = EncoderVariant::from_identifier(identifier);
    tracing::info!("Encoder '{}' resolved to {:?}", identifier, variant);

    let store  = EncoderStore::new(model_dir);
    let config = store
        .load_config()
        .map_err(|e| SimilarityError::encoder_load(format!("{e:#}")))?;

    check_layout(variant, &config)?;

    let model = store
        .load_model::<B>(&config, &device)
        .map_err(|e| SimilarityError::encoder_load(format!("{e:#}")))?;
    let tokenizer = TokenizerStore::new(model_dir)
        .load()
        .map_err(|e| SimilarityError::encoder_load(format!("{e:#}")))?;

    Ok(BurnEncoder::new(model, tokenizer, variant, config.max_sequence_len(), device))
}

/// The saved architecture must match the family's embedding and
/// output layout, or every vector would be silently wrong.
fn check_layout(variant: EncoderVariant, config: &BertEncoderConfig) -> Result<(), SimilarityError> {
    let mismatch = |field: &str, expected: String, found: String| {
        Err(SimilarityError::encoder_load(format!(
            "{variant:?} expects {field} = {expected}, config has {found}"
        )))
    };
    if config.use_pooler != variant.has_pooler() {
        return mismatch("use_pooler", variant.has_pooler().to_string(), config.use_pooler.to_string());
    }
    if config.type_vocab_size != variant.type_vocab_size() {
        return mismatch(
            "type_vocab_size",
            variant.type_vocab_size().to_string(),
            config.type_vocab_size.to_string(),
        );
    }
    if config.position_offset != variant.position_offset() {
        return mismatch(
            "position_offset",
            variant.position_offset().to_string(),
            config.position_offset.to_string(),
        );
    }
    Ok(())
}

/// Factory used by the application layer: WGPU backend, default device.
pub fn load_encoder(
    identifier: &str,
    model_dir:  &Path,
    verbose:    bool,
) -> Result<Box<dyn Encoder>, SimilarityError> {
    let device  = burn::backend::wgpu::WgpuDevice::default();
    let encoder = load_encoder_on::<InferBackend>(identifier, model_dir, device)?
        .with_verbose(verbose);
    Ok(Box::new(encoder))
}

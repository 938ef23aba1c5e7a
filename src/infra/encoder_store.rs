// ============================================================
// Layer 6 — Encoder Store
// ============================================================
// Restores a pretrained encoder from a model directory using
// Burn's CompactRecorder.
//
// Expected layout:
//   models/bert-base-uncased/
//     encoder_config.json   ← BertEncoderConfig (architecture)
//     encoder.mpk.gz        ← weights (MessagePack + gzip)
//     tokenizer.json        ← see tokenizer_store.rs
//
// The config is read first so the exact architecture can be
// rebuilt before the weights are loaded into it. Loading fails
// if the record does not match that architecture.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{BertEncoder, BertEncoderConfig};

pub const CONFIG_FILE:  &str = "encoder_config.json";
/// Recorder adds the `.mpk.gz` extension.
pub const WEIGHTS_FILE: &str = "encoder";

pub struct EncoderStore {
    dir: PathBuf,
}

impl EncoderStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Read the architecture description.
    pub fn load_config(&self) -> Result<BertEncoderConfig> {
        let path = self.dir.join(CONFIG_FILE);
        BertEncoderConfig::load(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot read encoder config '{}': {}", path.display(), e
            ))
    }

    /// Rebuild the model from `config` and load its weights.
    pub fn load_model<B: Backend>(
        &self,
        config: &BertEncoderConfig,
        device: &B::Device,
    ) -> Result<BertEncoder<B>> {
        let path  = self.dir.join(WEIGHTS_FILE);
        let model = config.init::<B>(device);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load encoder weights '{}.mpk.gz'", path.display())
            })?;

        tracing::info!(
            "Loaded encoder: {} layers, hidden size {}",
            config.num_layers,
            config.hidden_size
        );
        Ok(model.load_record(record))
    }

    /// Write config and weights in the layout `load_*` expects.
    pub fn save<B: Backend>(&self, config: &BertEncoderConfig, model: &BertEncoder<B>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let config_path = self.dir.join(CONFIG_FILE);
        config
            .save(&config_path)
            .with_context(|| format!("Cannot write '{}'", config_path.display()))?;

        let weights_path = self.dir.join(WEIGHTS_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), weights_path.clone())
            .with_context(|| format!("Cannot write weights to '{}'", weights_path.display()))?;

        tracing::debug!("Saved encoder to '{}'", self.dir.display());
        Ok(())
    }
}

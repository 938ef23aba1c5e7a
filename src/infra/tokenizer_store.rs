// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the pretrained tokenizer that ships with an encoder.
//
// The tokenizer is a Hugging Face `tokenizer.json` (WordPiece
// for BERT/DistilBERT, byte-level BPE for RoBERTa) stored next
// to the encoder weights. Vocabulary construction is never done
// here: the vocabulary must match the weights exactly.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load the tokenizer JSON from the model directory.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        let tokenizer = Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))?;
        tracing::debug!(
            "Loaded tokenizer from '{}' ({} entries)",
            path.display(),
            tokenizer.get_vocab_size(true)
        );
        Ok(tokenizer)
    }
}

/// A tiny WordPiece tokenizer in Hugging Face JSON format.
#[cfg(test)]
pub(crate) const TEST_TOKENIZER_JSON: &str = r###"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 2, "content": "[CLS]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 3, "content": "[SEP]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": {
    "type": "BertNormalizer",
    "clean_text": true,
    "handle_chinese_chars": true,
    "strip_accents": null,
    "lowercase": true
  },
  "pre_tokenizer": {
    "type": "BertPreTokenizer"
  },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordPiece",
    "unk_token": "[UNK]",
    "continuing_subword_prefix": "##",
    "max_input_chars_per_word": 100,
    "vocab": {
      "[PAD]": 0, "[UNK]": 1, "[CLS]": 2, "[SEP]": 3,
      "the": 4, "run": 5, "##ner": 6, "ran": 7,
      "man": 8, "dog": 9, "bark": 10, "##s": 11
    }
  }
}"###;

/// A tiny byte-level BPE tokenizer in the RoBERTa layout.
#[cfg(test)]
pub(crate) const TEST_BYTE_LEVEL_TOKENIZER_JSON: &str = r###"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "<s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 1, "content": "<pad>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 2, "content": "</s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 3, "content": "<unk>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {
    "type": "ByteLevel",
    "add_prefix_space": false,
    "trim_offsets": true,
    "use_regex": true
  },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "BPE",
    "dropout": null,
    "unk_token": null,
    "continuing_subword_prefix": "",
    "end_of_word_suffix": "",
    "fuse_unk": false,
    "byte_fallback": false,
    "vocab": {
      "<s>": 0, "<pad>": 1, "</s>": 2, "<unk>": 3,
      "Ġ": 4, "T": 5, "h": 6, "e": 7, "r": 8, "u": 9, "n": 10, "a": 11,
      "ĠT": 12, "he": 13, "ĠThe": 14, "Ġr": 15, "un": 16, "Ġrun": 17,
      "ne": 18, "ner": 19, "Ġra": 20, "Ġran": 21
    },
    "merges": [
      "Ġ T", "h e", "ĠT he", "Ġ r", "u n", "Ġr un",
      "n e", "ne r", "Ġr a", "Ġra n"
    ]
  }
}"###;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_tokenizer_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKENIZER_FILE), TEST_TOKENIZER_JSON).unwrap();

        let tokenizer = TokenizerStore::new(dir.path()).load().unwrap();
        let enc = tokenizer.encode("[CLS] The runner ran [SEP]", false).unwrap();
        assert_eq!(enc.get_tokens(), ["[CLS]", "the", "run", "##ner", "ran", "[SEP]"]);
    }

    #[test]
    fn test_byte_level_marks_word_starts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKENIZER_FILE), TEST_BYTE_LEVEL_TOKENIZER_JSON).unwrap();

        let tokenizer = TokenizerStore::new(dir.path()).load().unwrap();
        let enc = tokenizer.encode("<s> The runner ran</s>", false).unwrap();
        assert_eq!(enc.get_tokens(), ["<s>", "ĠThe", "Ġrun", "ner", "Ġran", "</s>"]);

        // A space before the end marker becomes a piece of its own
        let spaced = tokenizer.encode("<s> The runner ran </s>", false).unwrap();
        assert_eq!(spaced.get_tokens(), ["<s>", "ĠThe", "Ġrun", "ner", "Ġran", "Ġ", "</s>"]);
    }

    #[test]
    fn test_missing_tokenizer_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenizerStore::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains(TOKENIZER_FILE));
    }
}

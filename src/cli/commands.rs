// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `score` and `align`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::score_use_case::ScoreConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the target word of every sentence pair
    Score(ScoreArgs),

    /// Show the tokenization and target sub-token of one sentence
    Align(AlignArgs),
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file with [["sentence 1", "sentence 2"], ...];
    /// each sentence marks its target word with '@'
    #[arg(long)]
    pub pairs: String,

    /// Directory with encoder_config.json, encoder.mpk.gz and tokenizer.json
    #[arg(long, default_value = "models/bert-base-uncased")]
    pub model_dir: String,

    /// Pretrained identifier; roberta-base and distilbert-base-uncased
    /// select their own families, anything else is treated as BERT
    #[arg(long, default_value = "bert-base-uncased")]
    pub encoder_variant: String,

    /// Which word to compare: head, dep-subj, dep-obj or dep
    #[arg(long, default_value = "head")]
    pub similarity_type: String,

    /// How to merge the last four layers: sum or concat
    #[arg(long, default_value = "sum")]
    pub combine_method: String,

    /// Log every token sequence sent to the encoder
    #[arg(long)]
    pub verbose_encoder: bool,
}

/// The application layer never sees clap types.
impl From<ScoreArgs> for ScoreConfig {
    fn from(a: ScoreArgs) -> Self {
        ScoreConfig {
            pairs_path:      a.pairs,
            model_dir:       a.model_dir,
            encoder_variant: a.encoder_variant,
            similarity_type: a.similarity_type,
            combine_method:  a.combine_method,
            verbose_encoder: a.verbose_encoder,
        }
    }
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Sentence with its target word marked by '@'
    #[arg(long)]
    pub sentence: String,

    #[arg(long, default_value = "models/bert-base-uncased")]
    pub model_dir: String,

    #[arg(long, default_value = "bert-base-uncased")]
    pub encoder_variant: String,

    #[arg(long, default_value = "head")]
    pub similarity_type: String,
}

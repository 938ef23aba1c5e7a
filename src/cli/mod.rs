// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).
//
//   1. `score` — score a JSON file of sentence pairs
//   2. `align` — show where the target word of one sentence lands
//
// stdout carries the JSON result only; progress and logs go to
// stderr.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AlignArgs, Commands, ScoreArgs};

#[derive(Parser, Debug)]
#[command(
    name = "contextual-word-sim",
    version = "0.1.0",
    about = "Compare a target word across sentence pairs using the last four encoder layers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Score(args) => Self::run_score(args),
            Commands::Align(args) => Self::run_align(args),
        }
    }

    fn run_score(args: ScoreArgs) -> Result<()> {
        use crate::application::score_use_case::ScoreUseCase;

        let report = ScoreUseCase::new(args.into()).execute()?;
        if !report.skipped.is_empty() {
            tracing::warn!(
                "{} of {} pairs were skipped",
                report.skipped.len(),
                report.total
            );
        }

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

    fn run_align(args: AlignArgs) -> Result<()> {
        use crate::application::align_use_case::AlignUseCase;

        let alignment = AlignUseCase::new(
            args.sentence,
            args.similarity_type,
            args.encoder_variant,
            args.model_dir,
        )
        .execute()?;

        println!("{}", serde_json::to_string_pretty(&alignment)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::score_use_case::ScoreConfig;

    #[test]
    fn test_score_defaults() {
        let cli = Cli::try_parse_from(["contextual-word-sim", "score", "--pairs", "p.json"]).unwrap();
        let Commands::Score(args) = cli.command else { panic!("expected score") };
        let cfg: ScoreConfig = args.into();
        assert_eq!(cfg.pairs_path, "p.json");
        assert_eq!(cfg.similarity_type, "head");
        assert_eq!(cfg.combine_method, "sum");
        assert!(!cfg.verbose_encoder);
    }

    #[test]
    fn test_align_requires_sentence() {
        assert!(Cli::try_parse_from(["contextual-word-sim", "align"]).is_err());
    }
}

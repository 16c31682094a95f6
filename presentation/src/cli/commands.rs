//! CLI command definitions

use clap::{Parser, ValueEnum};
use nlp_quorum_domain::{ConfidenceStrategy, MatchingMode, VotingConfig};
use std::path::PathBuf;

/// Output format for voting results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with per-category counts
    Summary,
    /// Full voting result as JSON
    Json,
}

impl From<nlp_quorum_domain::OutputFormat> for OutputFormat {
    fn from(format: nlp_quorum_domain::OutputFormat) -> Self {
        match format {
            nlp_quorum_domain::OutputFormat::Summary => OutputFormat::Summary,
            nlp_quorum_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for nlp-quorum
#[derive(Parser, Debug)]
#[command(name = "nlp-quorum")]
#[command(author, version, about = "Quorum voting over annotations from several NLP tools")]
#[command(long_about = r#"
nlp-quorum reconciles the annotations of several NLP tools run over the same text.

Each input file holds one processor output (or a JSON array of them) with
tokens, dependencies and entities. An annotation is kept when at least
--min-agreement sources propose it:

1. Clustering: tokens and entities are grouped by character-span overlap (IOU)
2. Resolution: the largest agreeing group must reach the quorum
3. Merge: accepted groups collapse into one annotation with a combined confidence

Configuration files are loaded from (in priority order):
1. NLP_QUORUM_* environment variables, e.g. NLP_QUORUM_VOTING__MIN_AGREEMENT=3
2. --config <path>        Explicit config file
3. ./nlp-quorum.toml      Project-level config
4. ~/.config/nlp-quorum/config.toml   Global config

Example:
  nlp-quorum spacy.json stanza.json nltk.json
  nlp-quorum --min-agreement 3 --strict --strategy noisy_or batch.json
  nlp-quorum --report -o json batch.json > result.json
"#)]
pub struct Cli {
    /// JSON files with processor outputs, voted on in the given order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Minimum number of sources that must agree
    #[arg(short = 'n', long, value_name = "N")]
    pub min_agreement: Option<usize>,

    /// Span IOU needed to cluster two tokens or entities, in (0, 1]
    #[arg(long, value_name = "RATIO")]
    pub iou_threshold: Option<f64>,

    /// Match tokens on part-of-speech and lemma instead of part-of-speech alone
    #[arg(long)]
    pub strict: bool,

    /// Confidence aggregation, e.g. mean, noisy_or, trimmed_mean:0.2
    #[arg(short, long, value_name = "STRATEGY", value_parser = parse_strategy)]
    pub strategy: Option<ConfidenceStrategy>,

    /// Source whose dependencies are accepted without a quorum
    #[arg(long, value_name = "SOURCE")]
    pub authoritative: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Also report inter-annotator agreement on part-of-speech tags
    #[arg(long)]
    pub report: bool,

    /// Write voting events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Vote on categories one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration
    pub fn apply_overrides(&self, mut config: VotingConfig) -> VotingConfig {
        if let Some(min_agreement) = self.min_agreement {
            config = config.with_min_agreement(min_agreement);
        }
        if let Some(iou_threshold) = self.iou_threshold {
            config = config.with_iou_threshold(iou_threshold);
        }
        if self.strict {
            config = config.with_matching_mode(MatchingMode::Strict);
        }
        if let Some(strategy) = &self.strategy {
            config = config.with_confidence_strategy(strategy.clone());
        }
        if let Some(source) = &self.authoritative {
            config = config.with_authoritative_source(source.clone());
        }
        config
    }
}

fn parse_strategy(value: &str) -> Result<ConfidenceStrategy, String> {
    value.parse().map_err(|e: nlp_quorum_domain::DomainError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "nlp-quorum",
            "-n",
            "3",
            "--strict",
            "--strategy",
            "trimmed_mean:0.2",
            "-o",
            "json",
            "a.json",
            "b.json",
        ])
        .unwrap();
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.min_agreement, Some(3));
        assert_eq!(cli.strategy, Some(ConfidenceStrategy::TrimmedMean(0.2)));
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["nlp-quorum", "--strategy", "loudest", "a.json"]).is_err());
    }

    #[test]
    fn test_overrides_only_touch_given_flags() {
        let base = VotingConfig::default()
            .with_iou_threshold(0.7)
            .with_authoritative_source("stanza");
        let cli = Cli::try_parse_from(["nlp-quorum", "--min-agreement", "1", "--strict"]).unwrap();
        let config = cli.apply_overrides(base);

        assert_eq!(config.min_agreement, 1);
        assert_eq!(config.iou_threshold, 0.7);
        assert_eq!(config.token_matching_mode, MatchingMode::Strict);
        assert_eq!(config.authoritative_source.as_deref(), Some("stanza"));
    }
}

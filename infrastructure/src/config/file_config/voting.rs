//! Voting configuration from TOML (`[voting]` section)

use nlp_quorum_domain::voting::config::{DEFAULT_IOU_THRESHOLD, DEFAULT_MIN_AGREEMENT};
use nlp_quorum_domain::{
    ConfidenceStrategy, ConfigIssue, ConfigIssueCode, MatchingMode, Severity, VotingConfig,
};
use serde::{Deserialize, Serialize};

const STRATEGY_NAMES: [&str; 10] = [
    "mean",
    "weighted_mean",
    "min",
    "max",
    "harmonic_mean",
    "product",
    "noisy_or",
    "median",
    "trimmed_mean",
    "agreement_bonus",
];

/// Raw voting configuration from TOML
///
/// # Example
///
/// ```toml
/// [voting]
/// min_agreement = 2
/// iou_threshold = 0.5
/// token_matching = "strict"                # "flexible" or "strict"
/// confidence_strategy = "weighted_mean"    # see ConfidenceStrategy
/// weights = [1.0, 0.5]                     # only with weighted_mean
/// authoritative_source = "stanza"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Minimum number of agreeing sources
    pub min_agreement: usize,
    /// Span overlap needed to cluster two annotations
    pub iou_threshold: f64,
    /// Token matching mode: "flexible" or "strict"
    pub token_matching: String,
    /// Confidence aggregation, optionally with a `:parameter` suffix
    pub confidence_strategy: String,
    /// Positional weights for `weighted_mean`
    pub weights: Option<Vec<f64>>,
    /// Source whose dependencies bypass the quorum
    pub authoritative_source: Option<String>,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            min_agreement: DEFAULT_MIN_AGREEMENT,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            token_matching: MatchingMode::default().as_str().to_string(),
            confidence_strategy: ConfidenceStrategy::default().to_string(),
            weights: None,
            authoritative_source: None,
        }
    }
}

impl FileVotingConfig {
    /// Parse token_matching into MatchingMode, returning warnings on failure.
    pub fn parse_matching_mode(&self) -> (MatchingMode, Vec<ConfigIssue>) {
        match self.token_matching.parse::<MatchingMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let fallback = MatchingMode::default();
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "voting.token_matching".to_string(),
                        value: self.token_matching.clone(),
                        valid_values: vec!["flexible".to_string(), "strict".to_string()],
                    },
                    message: format!(
                        "voting.token_matching: unknown value '{}', falling back to '{}'",
                        self.token_matching, fallback
                    ),
                };
                (fallback, vec![issue])
            }
        }
    }

    /// Parse confidence_strategy and fold in `weights`.
    ///
    /// An unknown strategy name falls back to `mean` with a warning. A known
    /// name with a bad parameter is an error, since guessing a different
    /// parameter would silently change merged confidences.
    pub fn parse_confidence_strategy(&self) -> (ConfidenceStrategy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let strategy = match self.confidence_strategy.parse::<ConfidenceStrategy>() {
            Ok(strategy) => strategy,
            Err(e) if self.has_known_strategy_name() => {
                return (
                    ConfidenceStrategy::default(),
                    vec![ConfigIssue::from_domain_error(&e)],
                );
            }
            Err(_) => {
                let fallback = ConfidenceStrategy::default();
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "voting.confidence_strategy".to_string(),
                        value: self.confidence_strategy.clone(),
                        valid_values: STRATEGY_NAMES.iter().map(|s| s.to_string()).collect(),
                    },
                    message: format!(
                        "voting.confidence_strategy: unknown value '{}', falling back to '{}'",
                        self.confidence_strategy, fallback
                    ),
                });
                fallback
            }
        };

        let Some(weights) = &self.weights else {
            return (strategy, issues);
        };
        match strategy {
            ConfidenceStrategy::WeightedMean(inline) if inline.is_empty() => {
                let strategy = ConfidenceStrategy::WeightedMean(weights.clone());
                if let Err(e) = strategy.validate() {
                    issues.push(ConfigIssue::from_domain_error(&e));
                    return (ConfidenceStrategy::default(), issues);
                }
                (strategy, issues)
            }
            other => {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::UnusedWeights,
                    message: format!(
                        "voting.weights: ignored with confidence_strategy '{}'",
                        other
                    ),
                });
                (other, issues)
            }
        }
    }

    /// Build the engine configuration.
    ///
    /// Numeric ranges are not checked here; `VotingConfig::validate` and
    /// engine construction report them.
    pub fn to_voting_config(&self) -> (VotingConfig, Vec<ConfigIssue>) {
        let (mode, mut issues) = self.parse_matching_mode();
        let (strategy, strategy_issues) = self.parse_confidence_strategy();
        issues.extend(strategy_issues);

        let mut config = VotingConfig::default()
            .with_min_agreement(self.min_agreement)
            .with_iou_threshold(self.iou_threshold)
            .with_matching_mode(mode)
            .with_confidence_strategy(strategy);
        if let Some(source) = &self.authoritative_source {
            config = config.with_authoritative_source(source.clone());
        }
        (config, issues)
    }

    fn has_known_strategy_name(&self) -> bool {
        let normalized = self.confidence_strategy.trim().to_lowercase();
        let name = normalized.split(':').next().unwrap_or_default().trim();
        STRATEGY_NAMES.contains(&name)
    }
}

//! Voting engine configuration

use crate::confidence::ConfidenceStrategy;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_AGREEMENT: usize = 2;
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// How tokens inside one span cluster are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// Part-of-speech tag only
    #[default]
    Flexible,
    /// Part-of-speech tag and lower-cased lemma
    Strict,
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingMode::Flexible => "flexible",
            MatchingMode::Strict => "strict",
        }
    }
}

impl std::fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MatchingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flexible" => Ok(MatchingMode::Flexible),
            "strict" => Ok(MatchingMode::Strict),
            _ => Err(DomainError::InvalidMatchingMode(s.to_string())),
        }
    }
}

/// Immutable settings of one [`VotingEngine`](super::VotingEngine).
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::{ConfidenceStrategy, MatchingMode, VotingConfig};
///
/// let config = VotingConfig::default()
///     .with_min_agreement(3)
///     .with_matching_mode(MatchingMode::Strict)
///     .with_confidence_strategy(ConfidenceStrategy::NoisyOr)
///     .with_authoritative_source("spacy");
///
/// assert!(config.validate().is_ok());
/// assert!(VotingConfig::default().with_iou_threshold(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Quorum: independent sources that must agree
    pub min_agreement: usize,
    /// Minimum span IOU for two annotations to denote the same region
    pub iou_threshold: f64,
    pub token_matching_mode: MatchingMode,
    pub confidence_strategy: ConfidenceStrategy,
    /// Source whose dependencies are accepted without a quorum
    pub authoritative_source: Option<String>,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            min_agreement: DEFAULT_MIN_AGREEMENT,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            token_matching_mode: MatchingMode::default(),
            confidence_strategy: ConfidenceStrategy::default(),
            authoritative_source: None,
        }
    }
}

impl VotingConfig {
    pub fn with_min_agreement(mut self, min_agreement: usize) -> Self {
        self.min_agreement = min_agreement;
        self
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    pub fn with_matching_mode(mut self, mode: MatchingMode) -> Self {
        self.token_matching_mode = mode;
        self
    }

    pub fn with_confidence_strategy(mut self, strategy: ConfidenceStrategy) -> Self {
        self.confidence_strategy = strategy;
        self
    }

    pub fn with_authoritative_source(mut self, source: impl Into<String>) -> Self {
        self.authoritative_source = Some(source.into());
        self
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_agreement < 1 {
            return Err(DomainError::InvalidMinAgreement(self.min_agreement));
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold <= 1.0) {
            return Err(DomainError::InvalidIouThreshold(self.iou_threshold));
        }
        self.confidence_strategy.validate()
    }
}

//! Configurable confidence aggregation strategy

use super::aggregate;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const DEFAULT_TRIM_PROPORTION: f64 = 0.1;
const DEFAULT_AGREEMENT_BONUS: f64 = 0.1;

/// How the merger reduces the confidences of an accepted group to one score.
///
/// Parsed from its configuration name, optionally followed by `:` and a
/// parameter:
///
/// - `mean` (default), `min`, `max`, `harmonic_mean`, `product`, `noisy_or`, `median`
/// - `weighted_mean` or `weighted_mean:1.0,2.0,0.5`
/// - `trimmed_mean` or `trimmed_mean:0.2`
/// - `agreement_bonus` or `agreement_bonus:0.05`
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::ConfidenceStrategy;
///
/// let strategy: ConfidenceStrategy = "noisy_or".parse().unwrap();
/// assert_eq!(strategy.aggregate(&[0.5, 0.5]), 0.75);
///
/// let trimmed: ConfidenceStrategy = "trimmed_mean:0.2".parse().unwrap();
/// assert_eq!(trimmed, ConfidenceStrategy::TrimmedMean(0.2));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConfidenceStrategy {
    #[default]
    Mean,
    /// Positional weights; members beyond the list weigh `1.0`
    WeightedMean(Vec<f64>),
    Min,
    Max,
    HarmonicMean,
    Product,
    NoisyOr,
    Median,
    /// Proportion trimmed from each end, in `[0, 0.5)`
    TrimmedMean(f64),
    /// Bonus per agreeing source beyond the first
    AgreementBonus(f64),
}

impl ConfidenceStrategy {
    /// Reduce `confidences` to a single score. Returns `0.0` for empty input.
    pub fn aggregate(&self, confidences: &[f64]) -> f64 {
        match self {
            ConfidenceStrategy::Mean => aggregate::mean(confidences),
            ConfidenceStrategy::WeightedMean(weights) => {
                let aligned: Vec<f64> = (0..confidences.len())
                    .map(|i| weights.get(i).copied().unwrap_or(1.0))
                    .collect();
                aggregate::weighted_mean_unchecked(confidences, &aligned)
            }
            ConfidenceStrategy::Min => aggregate::min(confidences),
            ConfidenceStrategy::Max => aggregate::max(confidences),
            ConfidenceStrategy::HarmonicMean => aggregate::harmonic_mean(confidences),
            ConfidenceStrategy::Product => aggregate::product(confidences),
            ConfidenceStrategy::NoisyOr => aggregate::noisy_or(confidences),
            ConfidenceStrategy::Median => aggregate::median(confidences),
            ConfidenceStrategy::TrimmedMean(p) => {
                aggregate::trimmed_mean(confidences, *p).unwrap_or(0.0)
            }
            ConfidenceStrategy::AgreementBonus(bonus) => {
                aggregate::agreement_bonus(confidences, *bonus)
            }
        }
    }

    /// Check the strategy's parameters
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ConfidenceStrategy::TrimmedMean(p) => aggregate::validate_trim_proportion(*p),
            ConfidenceStrategy::AgreementBonus(bonus) if !bonus.is_finite() || *bonus < 0.0 => {
                Err(DomainError::InvalidStrategy(format!(
                    "agreement bonus must be a non-negative number (got {})",
                    bonus
                )))
            }
            ConfidenceStrategy::WeightedMean(weights)
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) =>
            {
                Err(DomainError::InvalidStrategy(
                    "weights must be non-negative numbers".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Configuration name, without parameters
    pub fn name(&self) -> &'static str {
        match self {
            ConfidenceStrategy::Mean => "mean",
            ConfidenceStrategy::WeightedMean(_) => "weighted_mean",
            ConfidenceStrategy::Min => "min",
            ConfidenceStrategy::Max => "max",
            ConfidenceStrategy::HarmonicMean => "harmonic_mean",
            ConfidenceStrategy::Product => "product",
            ConfidenceStrategy::NoisyOr => "noisy_or",
            ConfidenceStrategy::Median => "median",
            ConfidenceStrategy::TrimmedMean(_) => "trimmed_mean",
            ConfidenceStrategy::AgreementBonus(_) => "agreement_bonus",
        }
    }
}

impl std::fmt::Display for ConfidenceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceStrategy::WeightedMean(weights) if !weights.is_empty() => {
                let joined = weights
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "weighted_mean:{}", joined)
            }
            ConfidenceStrategy::TrimmedMean(p) => write!(f, "trimmed_mean:{}", p),
            ConfidenceStrategy::AgreementBonus(b) => write!(f, "agreement_bonus:{}", b),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl std::str::FromStr for ConfidenceStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let (name, param) = match normalized.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (normalized.as_str(), None),
        };

        let parse_number = |value: &str| -> Result<f64, DomainError> {
            value.parse::<f64>().map_err(|_| {
                DomainError::InvalidStrategy(format!("invalid parameter '{}' for {}", value, name))
            })
        };

        let strategy = match (name, param) {
            ("mean", None) => ConfidenceStrategy::Mean,
            ("min", None) => ConfidenceStrategy::Min,
            ("max", None) => ConfidenceStrategy::Max,
            ("harmonic_mean", None) => ConfidenceStrategy::HarmonicMean,
            ("product", None) => ConfidenceStrategy::Product,
            ("noisy_or", None) => ConfidenceStrategy::NoisyOr,
            ("median", None) => ConfidenceStrategy::Median,
            ("weighted_mean", None) => ConfidenceStrategy::WeightedMean(Vec::new()),
            ("weighted_mean", Some(list)) => ConfidenceStrategy::WeightedMean(
                list.split(',')
                    .map(|w| parse_number(w.trim()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ("trimmed_mean", None) => ConfidenceStrategy::TrimmedMean(DEFAULT_TRIM_PROPORTION),
            ("trimmed_mean", Some(p)) => ConfidenceStrategy::TrimmedMean(parse_number(p)?),
            ("agreement_bonus", None) => {
                ConfidenceStrategy::AgreementBonus(DEFAULT_AGREEMENT_BONUS)
            }
            ("agreement_bonus", Some(b)) => ConfidenceStrategy::AgreementBonus(parse_number(b)?),
            _ => {
                return Err(DomainError::InvalidStrategy(format!(
                    "unknown strategy '{}'. Valid: mean, weighted_mean[:w1,w2,..], min, max, \
                     harmonic_mean, product, noisy_or, median, trimmed_mean[:p], \
                     agreement_bonus[:b]",
                    s
                )));
            }
        };

        strategy.validate()?;
        Ok(strategy)
    }
}

impl TryFrom<String> for ConfidenceStrategy {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConfidenceStrategy> for String {
    fn from(strategy: ConfidenceStrategy) -> Self {
        strategy.to_string()
    }
}

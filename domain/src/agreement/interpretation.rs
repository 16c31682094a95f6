//! Landis & Koch style interpretation bands for kappa / alpha values

use serde::{Deserialize, Serialize};

/// Qualitative reading of a kappa or alpha value
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::agreement::AgreementLevel;
///
/// assert_eq!(AgreementLevel::from_score(0.45), AgreementLevel::Moderate);
/// assert_eq!(AgreementLevel::from_score(-0.1).to_string(), "Poor");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementLevel {
    /// Below 0: worse than chance
    Poor,
    /// [0, 0.20)
    Slight,
    /// [0.20, 0.40)
    Fair,
    /// [0.40, 0.60)
    Moderate,
    /// [0.60, 0.80)
    Substantial,
    /// [0.80, 1.0]
    AlmostPerfect,
}

impl AgreementLevel {
    /// Band for `score`; NaN reads as [`AgreementLevel::Poor`]
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() || score < 0.0 {
            AgreementLevel::Poor
        } else if score < 0.20 {
            AgreementLevel::Slight
        } else if score < 0.40 {
            AgreementLevel::Fair
        } else if score < 0.60 {
            AgreementLevel::Moderate
        } else if score < 0.80 {
            AgreementLevel::Substantial
        } else {
            AgreementLevel::AlmostPerfect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementLevel::Poor => "Poor",
            AgreementLevel::Slight => "Slight",
            AgreementLevel::Fair => "Fair",
            AgreementLevel::Moderate => "Moderate",
            AgreementLevel::Substantial => "Substantial",
            AgreementLevel::AlmostPerfect => "Almost perfect",
        }
    }
}

impl std::fmt::Display for AgreementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AgreementLevel::from_score(-0.01), AgreementLevel::Poor);
        assert_eq!(AgreementLevel::from_score(0.0), AgreementLevel::Slight);
        assert_eq!(AgreementLevel::from_score(0.1999), AgreementLevel::Slight);
        assert_eq!(AgreementLevel::from_score(0.20), AgreementLevel::Fair);
        assert_eq!(AgreementLevel::from_score(0.40), AgreementLevel::Moderate);
        assert_eq!(AgreementLevel::from_score(0.60), AgreementLevel::Substantial);
        assert_eq!(AgreementLevel::from_score(0.80), AgreementLevel::AlmostPerfect);
        assert_eq!(AgreementLevel::from_score(1.0), AgreementLevel::AlmostPerfect);
    }

    #[test]
    fn test_nan_is_poor() {
        assert_eq!(AgreementLevel::from_score(f64::NAN), AgreementLevel::Poor);
    }

    #[test]
    fn test_display() {
        assert_eq!(AgreementLevel::AlmostPerfect.to_string(), "Almost perfect");
        assert_eq!(AgreementLevel::Fair.to_string(), "Fair");
    }
}

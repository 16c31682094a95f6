//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("min_agreement must be at least 1 (got {0})")]
    InvalidMinAgreement(usize),

    #[error("iou_threshold must be in (0, 1] (got {0})")]
    InvalidIouThreshold(f64),

    #[error("Invalid confidence strategy: {0}")]
    InvalidStrategy(String),

    #[error("trim proportion must be in [0, 0.5) (got {0})")]
    InvalidTrimProportion(f64),

    #[error("Invalid matching mode: {0}. Valid: flexible, strict")]
    InvalidMatchingMode(String),

    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("At least two raters are required (got {0})")]
    InsufficientRaters(usize),
}

impl DomainError {
    /// Check if this error was raised while validating engine configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidMinAgreement(_)
                | DomainError::InvalidIouThreshold(_)
                | DomainError::InvalidStrategy(_)
                | DomainError::InvalidTrimProportion(_)
                | DomainError::InvalidMatchingMode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let error = DomainError::DimensionMismatch { left: 3, right: 4 };
        assert_eq!(error.to_string(), "Dimension mismatch: 3 vs 4");
    }

    #[test]
    fn test_is_config_error_check() {
        assert!(DomainError::InvalidMinAgreement(0).is_config_error());
        assert!(DomainError::InvalidIouThreshold(1.5).is_config_error());
        assert!(DomainError::InvalidStrategy("bogus".to_string()).is_config_error());
        assert!(!DomainError::DimensionMismatch { left: 1, right: 2 }.is_config_error());
        assert!(!DomainError::InsufficientRaters(1).is_config_error());
    }
}

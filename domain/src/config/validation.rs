//! Structured configuration issues
//!
//! Configuration sources report problems as values so that callers can
//! decide whether to warn and continue or abort.

use crate::core::error::DomainError;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the engine cannot be built with this configuration.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A string field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field lies outside its accepted range.
    OutOfRange { field: String },
    /// `weights` is set but the strategy does not use them.
    UnusedWeights,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Map an engine validation error onto the offending field
    pub fn from_domain_error(error: &DomainError) -> Self {
        let field = match error {
            DomainError::InvalidMinAgreement(_) => "voting.min_agreement",
            DomainError::InvalidIouThreshold(_) => "voting.iou_threshold",
            DomainError::InvalidTrimProportion(_) | DomainError::InvalidStrategy(_) => {
                "voting.confidence_strategy"
            }
            DomainError::InvalidMatchingMode(_) => "voting.token_matching",
            DomainError::DimensionMismatch { .. } | DomainError::InsufficientRaters(_) => {
                "voting"
            }
        };
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
            },
            message: format!("{}: {}", field, error),
        }
    }
}

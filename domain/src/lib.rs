//! Domain layer for nlp-quorum
//!
//! This crate contains the voting engine and everything it reasons about.
//! It performs no I/O and has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quorum
//!
//! Several independent analysis tools annotate the same text. An annotation
//! is trusted when at least `min_agreement` of them propose it:
//!
//! - **Clustering**: candidates for the same region are grouped by span IOU
//! - **Resolution**: the largest agreeing sub-group must reach the quorum
//! - **Merge**: accepted groups collapse into one annotation with an
//!   aggregated confidence
//!
//! ## Agreement statistics
//!
//! Independent of the merge path, [`agreement`] provides simple and
//! weighted agreement rates plus Fleiss' kappa, Cohen's kappa and
//! Krippendorff's alpha for quality reporting.

pub mod agreement;
pub mod annotation;
pub mod confidence;
pub mod config;
pub mod core;
pub mod voting;

// Re-export commonly used types
pub use agreement::{AgreementCounts, AgreementLevel, CategoryCounts, PairwiseAgreement};
pub use annotation::{
    Annotation, AnnotationCategory, Dependency, Entity, ProcessorOutput, Span, Spanned, Token,
};
pub use confidence::ConfidenceStrategy;
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use voting::{
    CategoryVote, MatchingMode, SkipReason, SkippedAnnotation, VotingConfig, VotingEngine,
    VotingResult,
};

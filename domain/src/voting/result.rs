//! Voting outcome types

use crate::agreement::{AgreementCounts, CategoryCounts};
use crate::annotation::{AnnotationCategory, Dependency, Entity, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Why an input annotation was left out of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Dependency head index absent from its output's tokens
    MissingHead { head: usize },
    /// Dependency dependent index absent from its output's tokens
    MissingDependent { dependent: usize },
    /// Span with `start >= end`
    EmptySpan { start: usize, end: usize },
    /// Confidence outside `[0, 1]` or not a number
    InvalidConfidence { confidence: f64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingHead { head } => write!(f, "head index {} not found", head),
            SkipReason::MissingDependent { dependent } => {
                write!(f, "dependent index {} not found", dependent)
            }
            SkipReason::EmptySpan { start, end } => write!(f, "empty span [{}, {})", start, end),
            SkipReason::InvalidConfidence { confidence } => {
                write!(f, "confidence {} outside [0, 1]", confidence)
            }
        }
    }
}

/// An input annotation dropped for a malformed reference, span or confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAnnotation {
    pub source: String,
    pub category: AnnotationCategory,
    /// Position of the annotation within its output's collection
    pub position: usize,
    pub reason: SkipReason,
}

/// Outcome of voting on one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVote<T> {
    pub agreed: Vec<T>,
    /// Rejected clusters or groups, members attributed to their sources
    pub disagreed: Vec<Vec<T>>,
    pub skipped: Vec<SkippedAnnotation>,
}

impl<T> Default for CategoryVote<T> {
    fn default() -> Self {
        Self {
            agreed: Vec::new(),
            disagreed: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> CategoryVote<T> {
    pub fn counts(&self) -> AgreementCounts {
        AgreementCounts::new(self.agreed.len(), self.disagreed.len())
    }
}

/// The reconciled annotation set of one voting run.
///
/// `disagreed_*` groups are diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VotingResult {
    pub agreed_tokens: Vec<Token>,
    pub agreed_dependencies: Vec<Dependency>,
    pub agreed_entities: Vec<Entity>,
    pub disagreed_tokens: Vec<Vec<Token>>,
    pub disagreed_dependencies: Vec<Vec<Dependency>>,
    pub disagreed_entities: Vec<Vec<Entity>>,
    /// Weighted overall agreement in `[0, 1]`
    pub agreement_score: f64,
    pub num_agreements: usize,
    pub num_disagreements: usize,
    pub participating_sources: BTreeSet<String>,
    #[serde(default)]
    pub skipped: Vec<SkippedAnnotation>,
}

impl VotingResult {
    /// Agreed / disagreed tallies per category
    pub fn category_counts(&self) -> CategoryCounts {
        CategoryCounts {
            tokens: AgreementCounts::new(self.agreed_tokens.len(), self.disagreed_tokens.len()),
            dependencies: AgreementCounts::new(
                self.agreed_dependencies.len(),
                self.disagreed_dependencies.len(),
            ),
            entities: AgreementCounts::new(
                self.agreed_entities.len(),
                self.disagreed_entities.len(),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_agreements == 0 && self.num_disagreements == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_counts() {
        let result = VotingResult {
            agreed_tokens: vec![Token::new(0, "a", 0, 1), Token::new(1, "b", 2, 3)],
            disagreed_tokens: vec![vec![Token::new(2, "c", 4, 5)]],
            agreed_entities: vec![Entity::new("GENE", 0, 1)],
            ..Default::default()
        };
        let counts = result.category_counts();
        assert_eq!(counts.tokens, AgreementCounts::new(2, 1));
        assert_eq!(counts.dependencies, AgreementCounts::new(0, 0));
        assert_eq!(counts.entities, AgreementCounts::new(1, 0));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::MissingHead { head: 7 }.to_string(),
            "head index 7 not found"
        );
        assert_eq!(
            SkipReason::EmptySpan { start: 4, end: 4 }.to_string(),
            "empty span [4, 4)"
        );
        assert_eq!(
            SkipReason::InvalidConfidence { confidence: 1.5 }.to_string(),
            "confidence 1.5 outside [0, 1]"
        );
    }

    #[test]
    fn test_skipped_serializes_tagged_reason() {
        let skipped = SkippedAnnotation {
            source: "stanza".to_string(),
            category: AnnotationCategory::Dependency,
            position: 3,
            reason: SkipReason::MissingDependent { dependent: 9 },
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["category"], "dependency");
        assert_eq!(json["reason"]["kind"], "missing_dependent");
        assert_eq!(json["reason"]["dependent"], 9);
    }

    #[test]
    fn test_empty_result() {
        assert!(VotingResult::default().is_empty());
    }
}

//! Count-based agreement rates

use serde::{Deserialize, Serialize};

/// Relative importance of each category in the overall score
pub const TOKEN_WEIGHT: f64 = 1.0;
pub const DEPENDENCY_WEIGHT: f64 = 2.0;
pub const ENTITY_WEIGHT: f64 = 1.5;

/// Agreed / disagreed tallies for one annotation category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementCounts {
    pub agreed: usize,
    pub disagreed: usize,
}

impl AgreementCounts {
    pub fn new(agreed: usize, disagreed: usize) -> Self {
        Self { agreed, disagreed }
    }

    pub fn total(&self) -> usize {
        self.agreed + self.disagreed
    }

    /// Share of agreed annotations, see [`simple_agreement`]
    pub fn rate(&self) -> f64 {
        simple_agreement(self.agreed, self.disagreed)
    }
}

/// Tallies for all three categories of one voting run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub tokens: AgreementCounts,
    pub dependencies: AgreementCounts,
    pub entities: AgreementCounts,
}

impl CategoryCounts {
    pub fn agreed(&self) -> usize {
        self.tokens.agreed + self.dependencies.agreed + self.entities.agreed
    }

    pub fn disagreed(&self) -> usize {
        self.tokens.disagreed + self.dependencies.disagreed + self.entities.disagreed
    }
}

/// `agreed / (agreed + disagreed)`, or `0.0` when there is nothing to compare
pub fn simple_agreement(agreed: usize, disagreed: usize) -> f64 {
    let total = agreed + disagreed;
    if total == 0 {
        return 0.0;
    }
    agreed as f64 / total as f64
}

/// Weighted average of the per-category agreement rates.
///
/// Weights are 1.0 for tokens, 2.0 for dependencies and 1.5 for entities.
/// Categories without any annotations are left out of the average; `0.0`
/// when no category has data.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::agreement::{AgreementCounts, CategoryCounts, overall_agreement};
///
/// let counts = CategoryCounts {
///     tokens: AgreementCounts::new(8, 2),
///     dependencies: AgreementCounts::new(5, 5),
///     entities: AgreementCounts::default(),
/// };
/// // (1.0 * 0.8 + 2.0 * 0.5) / 3.0
/// assert!((overall_agreement(&counts) - 0.6).abs() < 1e-9);
/// ```
pub fn overall_agreement(counts: &CategoryCounts) -> f64 {
    let weighted = [
        (counts.tokens, TOKEN_WEIGHT),
        (counts.dependencies, DEPENDENCY_WEIGHT),
        (counts.entities, ENTITY_WEIGHT),
    ];

    let (sum, total_weight) = weighted
        .iter()
        .filter(|(c, _)| c.total() > 0)
        .fold((0.0, 0.0), |(sum, weight_sum), (c, weight)| {
            (sum + c.rate() * weight, weight_sum + weight)
        });

    if total_weight == 0.0 {
        return 0.0;
    }
    sum / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_agreement() {
        assert_eq!(simple_agreement(0, 0), 0.0);
        assert_eq!(simple_agreement(3, 1), 0.75);
        assert_eq!(simple_agreement(0, 4), 0.0);
        assert_eq!(simple_agreement(4, 0), 1.0);
    }

    #[test]
    fn test_overall_agreement_no_data() {
        assert_eq!(overall_agreement(&CategoryCounts::default()), 0.0);
    }

    #[test]
    fn test_overall_agreement_single_category() {
        let counts = CategoryCounts {
            entities: AgreementCounts::new(1, 3),
            ..Default::default()
        };
        assert_eq!(overall_agreement(&counts), 0.25);
    }

    #[test]
    fn test_overall_agreement_all_categories() {
        let counts = CategoryCounts {
            tokens: AgreementCounts::new(1, 0),
            dependencies: AgreementCounts::new(0, 1),
            entities: AgreementCounts::new(1, 1),
        };
        // (1.0 * 1.0 + 2.0 * 0.0 + 1.5 * 0.5) / 4.5
        let expected = 1.75 / 4.5;
        assert!((overall_agreement(&counts) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_category_totals() {
        let counts = CategoryCounts {
            tokens: AgreementCounts::new(4, 1),
            dependencies: AgreementCounts::new(2, 2),
            entities: AgreementCounts::new(1, 0),
        };
        assert_eq!(counts.agreed(), 7);
        assert_eq!(counts.disagreed(), 3);
    }
}

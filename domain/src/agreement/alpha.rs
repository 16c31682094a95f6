//! Krippendorff's alpha, nominal metric

use std::collections::BTreeMap;

/// Simplified nominal Krippendorff's alpha over an items × raters matrix.
///
/// An empty label marks a missing rating; rows may differ in length.
/// Observed disagreement is the share of disagreeing rater pairs among the
/// pairs that both rated an item; expected disagreement comes from the
/// overall category marginals.
///
/// Returns `0.0` for an empty matrix or when no item has two ratings, and
/// `1.0` when at most one category occurs or expected disagreement is `0`.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::agreement::krippendorff_alpha;
///
/// let ratings = vec![vec!["NOUN", "NOUN"], vec!["NOUN", ""]];
/// assert_eq!(krippendorff_alpha(&ratings), 1.0);
/// ```
pub fn krippendorff_alpha<L: AsRef<str>>(ratings: &[Vec<L>]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in ratings.iter().flatten() {
        let label: &str = label.as_ref();
        if !label.is_empty() {
            *category_counts.entry(label).or_insert(0) += 1;
        }
    }
    if category_counts.len() <= 1 {
        return 1.0;
    }

    let mut pairs = 0usize;
    let mut disagreements = 0usize;
    for row in ratings {
        let present: Vec<&str> = row
            .iter()
            .map(|label| label.as_ref())
            .filter(|label: &&str| !label.is_empty())
            .collect();
        for (i, a) in present.iter().enumerate() {
            for b in &present[i + 1..] {
                pairs += 1;
                if a != b {
                    disagreements += 1;
                }
            }
        }
    }
    if pairs == 0 {
        return 0.0;
    }
    let observed = disagreements as f64 / pairs as f64;

    let total: usize = category_counts.values().sum();
    let probabilities: Vec<f64> = category_counts
        .values()
        .map(|count| *count as f64 / total as f64)
        .collect();
    // sum over ordered pairs of distinct categories
    let mut expected = 0.0;
    for (i, p1) in probabilities.iter().enumerate() {
        for (j, p2) in probabilities.iter().enumerate() {
            if i != j {
                expected += p1 * p2;
            }
        }
    }

    if expected == 0.0 {
        return 1.0;
    }
    1.0 - observed / expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_is_one() {
        let ratings = vec![vec!["NOUN", "NOUN", "NOUN"], vec!["NOUN", "NOUN", "NOUN"]];
        assert_eq!(krippendorff_alpha(&ratings), 1.0);
    }

    #[test]
    fn test_empty_is_zero() {
        let ratings: Vec<Vec<String>> = vec![];
        assert_eq!(krippendorff_alpha(&ratings), 0.0);
    }

    #[test]
    fn test_all_missing_is_one() {
        let ratings = vec![vec!["", ""], vec!["", ""]];
        assert_eq!(krippendorff_alpha(&ratings), 1.0);
    }

    #[test]
    fn test_no_pairs_is_zero() {
        // two categories, but no item was rated twice
        let ratings = vec![vec!["NOUN", ""], vec!["", "VERB"]];
        assert_eq!(krippendorff_alpha(&ratings), 0.0);
    }

    #[test]
    fn test_perfect_agreement_across_categories() {
        let ratings = vec![vec!["NOUN", "NOUN"], vec!["VERB", "VERB"]];
        // observed 0, expected 0.5
        assert_eq!(krippendorff_alpha(&ratings), 1.0);
    }

    #[test]
    fn test_known_value() {
        let ratings = vec![
            vec!["NOUN", "NOUN"],
            vec!["VERB", "NOUN"],
            vec!["VERB", "VERB"],
        ];
        // observed = 1/3; p = {NOUN: 0.5, VERB: 0.5} -> expected = 0.5
        let alpha = krippendorff_alpha(&ratings);
        assert!((alpha - (1.0 - (1.0 / 3.0) / 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let ratings = vec![vec!["NOUN", "NOUN", "NOUN"], vec!["VERB", "VERB"]];
        assert_eq!(krippendorff_alpha(&ratings), 1.0);
    }
}

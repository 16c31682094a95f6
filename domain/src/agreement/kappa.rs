//! Chance-corrected agreement: Fleiss' and Cohen's kappa

use crate::core::error::DomainError;
use std::collections::HashMap;

/// Fleiss' kappa for an items × raters label matrix.
///
/// Every row must hold one label per rater, and at least two raters are
/// required. Labels outside `categories` are not counted. Returns `0.0`
/// for an empty matrix and `1.0` when the expected agreement is `1.0`.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::agreement::fleiss_kappa;
///
/// let ratings = vec![
///     vec!["NOUN", "NOUN", "NOUN"],
///     vec!["VERB", "VERB", "VERB"],
/// ];
/// assert_eq!(fleiss_kappa(&ratings, &["NOUN", "VERB", "ADJ"]).unwrap(), 1.0);
/// ```
pub fn fleiss_kappa<L, C>(ratings: &[Vec<L>], categories: &[C]) -> Result<f64, DomainError>
where
    L: AsRef<str>,
    C: AsRef<str>,
{
    let Some(first) = ratings.first() else {
        return Ok(0.0);
    };
    let raters = first.len();
    if let Some(row) = ratings.iter().find(|row| row.len() != raters) {
        return Err(DomainError::DimensionMismatch {
            left: raters,
            right: row.len(),
        });
    }
    if raters < 2 {
        return Err(DomainError::InsufficientRaters(raters));
    }

    let index = category_index(categories);
    let items = ratings.len();

    // items x categories: how many raters put item i into category j
    let mut matrix = vec![vec![0usize; categories.len()]; items];
    for (row, labels) in matrix.iter_mut().zip(ratings) {
        for label in labels {
            if let Some(&j) = index.get(label.as_ref()) {
                row[j] += 1;
            }
        }
    }

    let n = raters as f64;
    let p_bar = matrix
        .iter()
        .map(|row| {
            let squares: usize = row.iter().map(|c| c * c).sum();
            (squares as f64 - n) / (n * (n - 1.0))
        })
        .sum::<f64>()
        / items as f64;

    let assignments = items as f64 * n;
    let p_e: f64 = (0..categories.len())
        .map(|j| {
            let p_j = matrix.iter().map(|row| row[j]).sum::<usize>() as f64 / assignments;
            p_j * p_j
        })
        .sum();

    if p_e == 1.0 {
        return Ok(1.0);
    }
    Ok((p_bar - p_e) / (1.0 - p_e))
}

/// Cohen's kappa for two equally long label sequences.
///
/// Fails with [`DomainError::DimensionMismatch`] when the lengths differ.
/// Returns `0.0` for empty sequences and `1.0` when chance agreement is `1.0`.
pub fn cohen_kappa<A, B, C>(first: &[A], second: &[B], categories: &[C]) -> Result<f64, DomainError>
where
    A: AsRef<str>,
    B: AsRef<str>,
    C: AsRef<str>,
{
    if first.len() != second.len() {
        return Err(DomainError::DimensionMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    if first.is_empty() {
        return Ok(0.0);
    }

    let n = first.len() as f64;
    let observed = first
        .iter()
        .zip(second)
        .filter(|(a, b)| a.as_ref() == b.as_ref())
        .count() as f64
        / n;

    let index = category_index(categories);
    let mut counts_first = vec![0usize; categories.len()];
    let mut counts_second = vec![0usize; categories.len()];
    for (a, b) in first.iter().zip(second) {
        if let Some(&j) = index.get(a.as_ref()) {
            counts_first[j] += 1;
        }
        if let Some(&j) = index.get(b.as_ref()) {
            counts_second[j] += 1;
        }
    }

    let chance: f64 = counts_first
        .iter()
        .zip(&counts_second)
        .map(|(a, b)| (*a as f64 / n) * (*b as f64 / n))
        .sum();

    if chance == 1.0 {
        return Ok(1.0);
    }
    Ok((observed - chance) / (1.0 - chance))
}

/// Label -> column, keeping the first position of duplicated labels
fn category_index<C: AsRef<str>>(categories: &[C]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(categories.len());
    for (j, category) in categories.iter().enumerate() {
        index.entry(category.as_ref()).or_insert(j);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: [&str; 3] = ["NOUN", "VERB", "ADJ"];

    #[test]
    fn test_fleiss_unanimous_is_one() {
        let ratings = vec![
            vec!["NOUN", "NOUN", "NOUN"],
            vec!["VERB", "VERB", "VERB"],
            vec!["ADJ", "ADJ", "ADJ"],
        ];
        assert_eq!(fleiss_kappa(&ratings, &POS).unwrap(), 1.0);
    }

    #[test]
    fn test_fleiss_single_category_everywhere() {
        let ratings = vec![vec!["NOUN", "NOUN"], vec!["NOUN", "NOUN"]];
        assert_eq!(fleiss_kappa(&ratings, &POS).unwrap(), 1.0);
    }

    #[test]
    fn test_fleiss_known_value() {
        let ratings = vec![vec!["NOUN", "NOUN", "NOUN"], vec!["VERB", "NOUN", "VERB"]];
        // P_i = [1, 1/3], P_bar = 2/3
        // p_NOUN = 4/6, p_VERB = 2/6 -> P_e = 20/36
        // kappa = (2/3 - 5/9) / (4/9) = 0.25
        let kappa = fleiss_kappa(&ratings, &POS).unwrap();
        assert!((kappa - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fleiss_empty_is_zero() {
        let ratings: Vec<Vec<&str>> = vec![];
        assert_eq!(fleiss_kappa(&ratings, &POS).unwrap(), 0.0);
    }

    #[test]
    fn test_fleiss_ragged_rows_fail() {
        let ratings = vec![vec!["NOUN", "NOUN"], vec!["NOUN"]];
        assert_eq!(
            fleiss_kappa(&ratings, &POS).unwrap_err(),
            DomainError::DimensionMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn test_fleiss_requires_two_raters() {
        let ratings = vec![vec!["NOUN"], vec!["VERB"]];
        assert_eq!(
            fleiss_kappa(&ratings, &POS).unwrap_err(),
            DomainError::InsufficientRaters(1)
        );
    }

    #[test]
    fn test_cohen_identical_is_one() {
        let labels = ["NOUN", "VERB", "ADJ", "NOUN"];
        assert_eq!(cohen_kappa(&labels, &labels, &POS).unwrap(), 1.0);
    }

    #[test]
    fn test_cohen_known_value() {
        let a = ["NOUN", "NOUN", "VERB", "VERB"];
        let b = ["NOUN", "VERB", "VERB", "VERB"];
        // p_o = 0.75; p_e = 0.5 * 0.25 + 0.5 * 0.75 = 0.5
        let kappa = cohen_kappa(&a, &b, &POS).unwrap();
        assert!((kappa - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cohen_length_mismatch() {
        let err = cohen_kappa(&["NOUN"], &["NOUN", "VERB"], &POS).unwrap_err();
        assert_eq!(err, DomainError::DimensionMismatch { left: 1, right: 2 });
    }

    #[test]
    fn test_cohen_empty_is_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(cohen_kappa(&empty, &empty, &POS).unwrap(), 0.0);
    }

    #[test]
    fn test_cohen_same_single_category() {
        let a = ["NOUN", "NOUN"];
        assert_eq!(cohen_kappa(&a, &a, &POS).unwrap(), 1.0);
    }
}

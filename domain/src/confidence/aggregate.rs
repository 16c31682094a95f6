//! Pure reduction functions over confidence scores.
//!
//! Every function returns `0.0` for an empty input and never mutates it.

use crate::core::error::DomainError;

/// Arithmetic mean
pub fn mean(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    confidences.iter().sum::<f64>() / confidences.len() as f64
}

/// Weighted mean; `weights` pair positionally with `confidences`.
///
/// Either slice empty yields `0.0`. Otherwise fails when the two slices
/// differ in length. A zero total weight yields `0.0`.
pub fn weighted_mean(confidences: &[f64], weights: &[f64]) -> Result<f64, DomainError> {
    if confidences.is_empty() || weights.is_empty() {
        return Ok(0.0);
    }
    if confidences.len() != weights.len() {
        return Err(DomainError::DimensionMismatch {
            left: confidences.len(),
            right: weights.len(),
        });
    }
    Ok(weighted_mean_unchecked(confidences, weights))
}

pub(crate) fn weighted_mean_unchecked(confidences: &[f64], weights: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    confidences
        .iter()
        .zip(weights)
        .map(|(c, w)| c * w)
        .sum::<f64>()
        / total_weight
}

/// Pessimistic: the lowest confidence
pub fn min(confidences: &[f64]) -> f64 {
    confidences.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Optimistic: the highest confidence
pub fn max(confidences: &[f64]) -> f64 {
    confidences.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Harmonic mean of the non-zero entries
pub fn harmonic_mean(confidences: &[f64]) -> f64 {
    let non_zero: Vec<f64> = confidences.iter().copied().filter(|c| *c > 0.0).collect();
    if non_zero.is_empty() {
        return 0.0;
    }
    non_zero.len() as f64 / non_zero.iter().map(|c| 1.0 / c).sum::<f64>()
}

/// Product, treating sources as independent
pub fn product(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    confidences.iter().product()
}

/// `1 - Π(1 - cᵢ)`: probability that at least one source is right
pub fn noisy_or(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    1.0 - confidences.iter().map(|c| 1.0 - c).product::<f64>()
}

/// Median; the mean of the two middle values for even lengths
pub fn median(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(confidences);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Mean after dropping `floor(n * proportion)` values from each end.
///
/// `proportion` must lie in `[0, 0.5)`.
pub fn trimmed_mean(confidences: &[f64], proportion: f64) -> Result<f64, DomainError> {
    validate_trim_proportion(proportion)?;
    if confidences.is_empty() {
        return Ok(0.0);
    }
    let sorted = sorted_copy(confidences);
    let trim = (sorted.len() as f64 * proportion).floor() as usize;
    Ok(mean(&sorted[trim..sorted.len() - trim]))
}

/// Mean plus `bonus` for every agreeing source beyond the first, capped at `1.0`
pub fn agreement_bonus(confidences: &[f64], bonus: f64) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    let extra = (confidences.len() - 1) as f64 * bonus;
    (mean(confidences) + extra).min(1.0)
}

pub(crate) fn validate_trim_proportion(proportion: f64) -> Result<(), DomainError> {
    if (0.0..0.5).contains(&proportion) {
        Ok(())
    } else {
        Err(DomainError::InvalidTrimProportion(proportion))
    }
}

fn sorted_copy(confidences: &[f64]) -> Vec<f64> {
    let mut sorted = confidences.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_inputs_return_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(weighted_mean(&[], &[]).unwrap(), 0.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[]), 0.0);
        assert_eq!(harmonic_mean(&[]), 0.0);
        assert_eq!(product(&[]), 0.0);
        assert_eq!(noisy_or(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(trimmed_mean(&[], 0.1).unwrap(), 0.0);
        assert_eq!(agreement_bonus(&[], 0.1), 0.0);
    }

    #[test]
    fn test_noisy_or() {
        assert!(approx(noisy_or(&[0.5, 0.5]), 0.75));
        assert!(approx(noisy_or(&[0.9]), 0.9));
    }

    #[test]
    fn test_min_mean_max_ordering() {
        let samples: [&[f64]; 4] = [
            &[0.3, 0.9, 0.6],
            &[1.0],
            &[0.0, 0.0, 1.0, 0.25],
            &[0.42, 0.42],
        ];
        for values in samples {
            assert!(min(values) <= mean(values));
            assert!(mean(values) <= max(values));
        }
    }

    #[test]
    fn test_weighted_mean() {
        assert!(approx(weighted_mean(&[1.0, 0.0], &[3.0, 1.0]).unwrap(), 0.75));
        assert_eq!(weighted_mean(&[0.5, 0.5], &[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_weighted_mean_dimension_mismatch() {
        let err = weighted_mean(&[0.5, 0.5], &[1.0]).unwrap_err();
        assert_eq!(err, DomainError::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_weighted_mean_without_weights_is_zero() {
        assert_eq!(weighted_mean(&[0.5, 0.9], &[]).unwrap(), 0.0);
        assert_eq!(weighted_mean(&[], &[1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_harmonic_mean_ignores_zeros() {
        assert!(approx(harmonic_mean(&[0.5, 0.0, 0.5]), 0.5));
        assert_eq!(harmonic_mean(&[0.0, 0.0]), 0.0);
        // 2 / (1/0.5 + 1/1.0)
        assert!(approx(harmonic_mean(&[0.5, 1.0]), 2.0 / 3.0));
    }

    #[test]
    fn test_product() {
        assert!(approx(product(&[0.5, 0.5, 0.8]), 0.2));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[0.9, 0.1, 0.5]), 0.5);
        assert!(approx(median(&[0.9, 0.1, 0.5, 0.3]), 0.4));
    }

    #[test]
    fn test_median_does_not_mutate_input() {
        let values = vec![0.9, 0.1, 0.5];
        let _ = median(&values);
        assert_eq!(values, vec![0.9, 0.1, 0.5]);
    }

    #[test]
    fn test_trimmed_mean() {
        // n = 10, p = 0.1 -> one value trimmed from each end
        let values = [0.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 1.0];
        assert!(approx(trimmed_mean(&values, 0.1).unwrap(), 0.5));
        // n = 3, p = 0.1 -> nothing trimmed
        assert!(approx(trimmed_mean(&[0.0, 0.5, 1.0], 0.1).unwrap(), 0.5));
        assert!(approx(trimmed_mean(&[0.2, 0.4], 0.0).unwrap(), 0.3));
    }

    #[test]
    fn test_trimmed_mean_rejects_bad_proportion() {
        assert_eq!(
            trimmed_mean(&[0.5], 0.5).unwrap_err(),
            DomainError::InvalidTrimProportion(0.5)
        );
        assert!(trimmed_mean(&[0.5], -0.1).is_err());
    }

    #[test]
    fn test_agreement_bonus() {
        assert!(approx(agreement_bonus(&[0.6, 0.6, 0.6], 0.1), 0.8));
        assert_eq!(agreement_bonus(&[0.95, 0.95], 0.1), 1.0);
        assert!(approx(agreement_bonus(&[0.4], 0.3), 0.4));
    }
}

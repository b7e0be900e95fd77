pub mod momentum;
pub mod rsi;
pub mod volatility;

pub use momentum::*;
pub use rsi::*;
pub use volatility::*;

use crate::error::{Result, SignalError};

pub trait Calculator {
    type Label;

    /// Derives the label for one month of values.
    fn identify(&self, series: &[f64]) -> Result<Self::Label>;
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from the mean, not divided by the count.
pub fn sum_squared_deviations(values: &[f64]) -> f64 {
    match mean(values) {
        Some(mean) => values.iter().map(|v| (v - mean).powi(2)).sum(),
        None => 0.0,
    }
}

pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some((sum_squared_deviations(values) / values.len() as f64).sqrt())
}

/// Least-squares slope of `values` against the 1-based day index.
///
/// A day whose index equals the mean index (the middle day of an odd-length
/// series, or the only day of a single-element series) contributes its squared
/// index to the denominator instead of a zero deviation. Month labels in the
/// persisted corpora depend on this weighting.
pub fn regression_slope(values: &[f64]) -> Result<f64> {
    let n = values.len();
    if n == 0 {
        return Err(SignalError::DegenerateInput(
            "Cannot fit a line of best fit to an empty series".to_string(),
        ));
    }

    let day_mean = (n + 1) as f64 / 2.0;
    let value_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, value) in values.iter().enumerate() {
        let day = (i + 1) as f64;
        let day_deviation = day - day_mean;
        numerator += day_deviation * (value - value_mean);
        if day_deviation != 0.0 {
            denominator += day_deviation * day_deviation;
        } else {
            denominator += day * day;
        }
    }

    if denominator == 0.0 {
        return Err(SignalError::DegenerateInput(
            "Zero denominator for slope of line of best fit".to_string(),
        ));
    }

    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_regression_slope_mixed_series() {
        let slope = regression_slope(&[-5.0, 4.0, 3.0, -2.0, 9.0]).unwrap();
        assert_abs_diff_eq!(slope, 1.15789474, epsilon = 1e-8);
    }

    #[test]
    fn test_regression_slope_ascending_series() {
        let slope = regression_slope(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert_abs_diff_eq!(slope, 0.63636364, epsilon = 1e-8);
    }

    #[test]
    fn test_regression_slope_even_length_matches_ols() {
        // No day sits on the mean index, so the closed-form OLS slope applies.
        let values = [3.0, 5.0, 7.0, 9.0, 11.0, 13.0];
        let slope = regression_slope(&values).unwrap();
        assert!(slope > 0.0);
        assert_abs_diff_eq!(slope, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_regression_slope_single_value() {
        assert_eq!(regression_slope(&[42.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_regression_slope_empty_series() {
        assert!(matches!(
            regression_slope(&[]),
            Err(SignalError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_sum_squared_deviations_is_unnormalised() {
        assert_eq!(sum_squared_deviations(&[1.0, 2.0, 3.0, 4.0, 5.0]), 10.0);
        assert_eq!(sum_squared_deviations(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        let std = population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_abs_diff_eq!(std, 2.0, epsilon = 1e-12);
        assert!(population_std_dev(&[]).is_none());
    }
}

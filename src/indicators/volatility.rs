use tracing::debug;

use super::{mean, population_std_dev, regression_slope, sum_squared_deviations, Calculator};
use crate::error::Result;
use crate::types::{DailyPrice, Volatility, VolatilityCategory, VolatilityMeasure};

const IMPLIED_BETA_THRESHOLD: f64 = 0.5;
const HIGH_PROPORTION: f64 = 2.0 / 3.0;
const MEDIUM_PROPORTION: f64 = 1.0 / 3.0;

/// Labels a month of quartile prices by dispersion and implied/historical category.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolatilityCalculator;

impl VolatilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Average of the upper (close/high) and lower (low/open) quartile proxies.
    pub fn quartile_price(&self, opening: f64, closing: f64, high: f64, low: f64) -> f64 {
        let upper = (closing + high) / 2.0;
        let lower = (low + opening) / 2.0;
        (upper + lower) / 2.0
    }

    pub fn daily_quartile_price(&self, price: &DailyPrice) -> f64 {
        self.quartile_price(price.opening, price.closing, price.high, price.low)
    }

    /// Sum of squared deviations from the mean. Not divided by the series length.
    pub fn price_variance(&self, quartile_prices: &[f64]) -> f64 {
        sum_squared_deviations(quartile_prices)
    }

    pub fn beta_risk_proportion(&self, quartile_prices: &[f64], variance: f64) -> Result<f64> {
        if quartile_prices.is_empty() || variance == 0.0 {
            return Ok(0.0);
        }
        let covariance = regression_slope(quartile_prices)? * variance;
        Ok((variance / quartile_prices.len() as f64).sqrt() * covariance)
    }

    /// Population z-scores. A constant series, one-day months included, has
    /// no defined z-score and standardizes to all `NaN`.
    pub fn standardize_quartile_prices(&self, quartile_prices: &[f64]) -> Vec<f64> {
        let (Some(mean), Some(std_dev)) = (mean(quartile_prices), population_std_dev(quartile_prices)) else {
            return Vec::new();
        };
        if std_dev == 0.0 || !std_dev.is_finite() {
            return vec![f64::NAN; quartile_prices.len()];
        }
        quartile_prices.iter().map(|p| (p - mean) / std_dev).collect()
    }

    pub fn identify_volatility(&self, quartile_prices: &[f64]) -> Result<Volatility> {
        if quartile_prices.is_empty() {
            return Ok(Volatility::new(VolatilityMeasure::Low, VolatilityCategory::Historical));
        }

        let variance = self.price_variance(quartile_prices);
        let beta = self.beta_risk_proportion(quartile_prices, variance)?;
        let category = if beta.abs() >= IMPLIED_BETA_THRESHOLD {
            VolatilityCategory::Implied
        } else {
            VolatilityCategory::Historical
        };

        // Both the index and its thresholds scale with the month length.
        let len = quartile_prices.len() as f64;
        let index = variance / len;
        let measure = if index >= HIGH_PROPORTION * len {
            VolatilityMeasure::High
        } else if index >= MEDIUM_PROPORTION * len {
            VolatilityMeasure::Medium
        } else {
            VolatilityMeasure::Low
        };

        debug!("Volatility variance={:.4} beta={:.4} -> {:?} {:?}", variance, beta, measure, category);
        Ok(Volatility::new(measure, category))
    }
}

impl Calculator for VolatilityCalculator {
    type Label = Volatility;

    fn identify(&self, series: &[f64]) -> Result<Volatility> {
        self.identify_volatility(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quartile_price() {
        let calculator = VolatilityCalculator::new();
        assert_eq!(calculator.quartile_price(6.0, 3.0, 7.0, 2.0), 4.5);
        assert_eq!(calculator.daily_quartile_price(&DailyPrice::new(6.0, 3.0, 7.0, 2.0)), 4.5);
    }

    #[test]
    fn test_beta_risk_proportion() {
        let calculator = VolatilityCalculator::new();
        let beta = calculator
            .beta_risk_proportion(&[3.0, 7.0, 5.0, 3.0, 10.0], 4.0)
            .unwrap();
        assert_abs_diff_eq!(beta, 1.8830046126, epsilon = 1e-9);
    }

    #[test]
    fn test_beta_risk_proportion_degenerate() {
        let calculator = VolatilityCalculator::new();
        assert_eq!(calculator.beta_risk_proportion(&[], 4.0).unwrap(), 0.0);
        assert_eq!(calculator.beta_risk_proportion(&[1.0, 2.0], 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_standardized_prices_have_unit_scale() {
        let calculator = VolatilityCalculator::new();
        let z = calculator.standardize_quartile_prices(&[10.5, 11.25, 9.75, 12.0, 10.0, 13.5]);
        let z_mean = mean(&z).unwrap();
        let z_std = population_std_dev(&z).unwrap();
        assert_abs_diff_eq!(z_mean, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(z_std, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_standardize_constant_series() {
        let calculator = VolatilityCalculator::new();
        let z = calculator.standardize_quartile_prices(&[4.0, 4.0, 4.0]);
        assert_eq!(z.len(), 3);
        assert!(z.iter().all(|v| v.is_nan()));
        assert!(calculator.standardize_quartile_prices(&[7.0])[0].is_nan());
        assert!(calculator.standardize_quartile_prices(&[]).is_empty());
    }

    #[test]
    fn test_identify_volatility_empty_series() {
        let volatility = VolatilityCalculator::new().identify_volatility(&[]).unwrap();
        assert_eq!(volatility.measure, VolatilityMeasure::Low);
        assert_eq!(volatility.category, VolatilityCategory::Historical);
    }

    #[test]
    fn test_identify_volatility_levels() {
        let calculator = VolatilityCalculator::new();
        assert_eq!(
            calculator.identify_volatility(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap().to_string(),
            "Medium Implied"
        );
        assert_eq!(
            calculator.identify_volatility(&[0.0, 10.0, 0.0, 10.0]).unwrap().to_string(),
            "High Implied"
        );
        assert_eq!(
            calculator.identify_volatility(&[4.0, 4.0, 4.0]).unwrap().to_string(),
            "Low Historical"
        );
    }
}

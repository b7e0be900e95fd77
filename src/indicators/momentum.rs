use tracing::debug;

use super::{regression_slope, relative_strength_index, Calculator};
use crate::error::Result;
use crate::types::{Momentum, MomentumCategory, MomentumDirection};

/// Labels a month of price differences by trend and directionality.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_regression_slope(&self, price_differences: &[f64]) -> Result<f64> {
        regression_slope(price_differences)
    }

    pub fn compute_relative_strength_index(&self, price_differences: &[f64]) -> Result<f64> {
        relative_strength_index(price_differences)
    }

    pub fn identify_momentum(&self, price_differences: &[f64]) -> Result<Momentum> {
        let slope = self.compute_regression_slope(price_differences)?;
        let category = if slope > 0.0 {
            MomentumCategory::Bullish
        } else if slope < 0.0 {
            MomentumCategory::Bearish
        } else {
            return Ok(Momentum::indecision());
        };

        let rsi = self.compute_relative_strength_index(price_differences)?;
        let continues = match category {
            MomentumCategory::Bullish => rsi > 0.0,
            MomentumCategory::Bearish => rsi < 0.0,
            MomentumCategory::Indecision => false,
        };
        let direction = if continues {
            MomentumDirection::Continuation
        } else {
            MomentumDirection::Reversal
        };

        debug!("Momentum slope={:.4} rsi={:.4} -> {:?} {:?}", slope, rsi, category, direction);
        Ok(Momentum::new(category, direction))
    }
}

impl Calculator for MomentumCalculator {
    type Label = Momentum;

    fn identify(&self, series: &[f64]) -> Result<Momentum> {
        self.identify_momentum(series)
    }
}

use crate::error::{Result, SignalError};

const FULL_PERCENTAGE: f64 = 100.0;

/// Single-step RSI over a month of price differences.
///
/// Gains and losses are averaged over their own counts and losses keep their
/// sign, so the result is not bounded to 0..=100. A series without any gain
/// or without any loss yields `NaN`.
pub fn relative_strength_index(price_differences: &[f64]) -> Result<f64> {
    if price_differences.is_empty() {
        return Err(SignalError::DegenerateInput(
            "Cannot compute RSI of an empty series".to_string(),
        ));
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    let mut gain_count = 0usize;
    let mut loss_count = 0usize;

    for &difference in price_differences {
        if difference > 0.0 {
            gain_sum += difference;
            gain_count += 1;
        } else if difference < 0.0 {
            loss_sum += difference;
            loss_count += 1;
        }
    }

    let avg_gain = gain_sum / gain_count as f64;
    let avg_loss = loss_sum / loss_count as f64;

    Ok(FULL_PERCENTAGE - FULL_PERCENTAGE / (1.0 + avg_gain / avg_loss))
}

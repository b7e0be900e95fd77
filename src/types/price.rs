use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One trading day of prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub opening: f64,
    pub closing: f64,
    pub high: f64,
    pub low: f64,
}

impl DailyPrice {
    pub fn new(opening: f64, closing: f64, high: f64, low: f64) -> Self {
        Self {
            opening,
            closing,
            high,
            low,
        }
    }

    /// Opening minus closing; the per-day input to momentum labelling.
    pub fn price_difference(&self) -> f64 {
        self.opening - self.closing
    }
}

/// A dated row of the price history, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub price: DailyPrice,
}

impl PriceRow {
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::motif::{decode_corpus, MotifAlphabet};
use crate::error::{checked_get, Result, SignalError};

/// A month's momentum as a point in (increase, decrease, static) probability space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumPoint {
    pub label: String,
    pub price_increase_probability: f64,
    pub price_decrease_probability: f64,
    pub static_price_probability: f64,
    /// Distance to the most recent query; overwritten by every lookup.
    #[serde(skip)]
    pub distance: f64,
}

impl MomentumPoint {
    pub fn new(label: impl Into<String>, increase: f64, decrease: f64, unchanged: f64) -> Self {
        Self {
            label: label.into(),
            price_increase_probability: increase,
            price_decrease_probability: decrease,
            static_price_probability: unchanged,
            distance: 0.0,
        }
    }

    fn from_frequencies(label: String, frequencies: &[f64]) -> Option<Self> {
        match frequencies {
            [increase, decrease, unchanged] => Some(Self::new(label, *increase, *decrease, *unchanged)),
            _ => None,
        }
    }

    pub fn euclidean_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        ((x - self.price_increase_probability).powi(2)
            + (y - self.price_decrease_probability).powi(2)
            + (z - self.static_price_probability).powi(2))
        .sqrt()
    }
}

/// Nearest-neighbour style model over momentum corpus points.
#[derive(Debug, Clone, Default)]
pub struct MomentumModel {
    points: Vec<MomentumPoint>,
}

impl MomentumModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<MomentumPoint>) -> Self {
        Self { points }
    }

    pub fn from_corpus_text(text: &str) -> Self {
        let points = decode_corpus(MotifAlphabet::Momentum, text)
            .into_iter()
            .filter_map(|entry| MomentumPoint::from_frequencies(entry.label, &entry.frequencies))
            .collect();
        Self { points }
    }

    /// Loads a momentum corpus file. Fails when the file cannot be read or is empty.
    pub fn validate_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SignalError::unreadable(path, e.to_string()))?;
        if text.trim().is_empty() {
            return Err(SignalError::unreadable(path, "file is empty"));
        }
        let model = Self::from_corpus_text(&text);
        info!("Momentum model loaded {} points from {}", model.points.len(), path.display());
        Ok(model)
    }

    /// Adds the point described by one motif line.
    pub fn generate_point(&mut self, label: &str, motif_line: &str) -> Result<()> {
        let frequencies = MotifAlphabet::Momentum.frequencies(motif_line).ok_or_else(|| {
            SignalError::DegenerateInput(format!("Not a momentum motif line: {:?}", motif_line))
        })?;
        if let Some(point) = MomentumPoint::from_frequencies(label.to_string(), &frequencies) {
            self.points.push(point);
        }
        Ok(())
    }

    /// Mean squared deviation of the `k` nearest distances from a
    /// semi-interquartile reference.
    ///
    /// Every point's distance to the query is recomputed and the points are
    /// re-sorted ascending by distance. The reference is the sum of the
    /// distances at sorted positions `floor(3n/4)` and `floor(n/4)`.
    pub fn compute_k_nearest_labels_average(&mut self, k: usize, x: f64, y: f64, z: f64) -> Result<f64> {
        if k == 0 {
            return Ok(0.0);
        }
        let n = self.points.len();
        if k > n {
            return Err(SignalError::IndexOutOfRange { index: k - 1, len: n });
        }

        for point in &mut self.points {
            point.distance = point.euclidean_distance(x, y, z);
        }
        self.points.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let reference = self.points[n * 3 / 4].distance + self.points[n / 4].distance;
        let total: f64 = self.points[..k]
            .iter()
            .map(|p| (p.distance - reference).powi(2))
            .sum();

        debug!("k={} reference={:.6} statistic={:.6}", k, reference, total / k as f64);
        Ok(total / k as f64)
    }

    pub fn points(&self) -> &[MomentumPoint] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn price_increase_probability(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.price_increase_probability)
    }

    pub fn price_decrease_probability(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.price_decrease_probability)
    }

    pub fn static_price_probability(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.static_price_probability)
    }

    pub fn distance(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.distance)
    }

    pub fn momentum_trend(&self, index: usize) -> Result<&str> {
        Ok(&checked_get(&self.points, index)?.label)
    }
}

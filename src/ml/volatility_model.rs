use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::motif::{decode_corpus, MotifAlphabet};
use crate::error::{checked_get, Result, SignalError};

/// A month's volatility as a point in (positive z, negative z) probability space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub label: String,
    pub positive_z_probability: f64,
    pub negative_z_probability: f64,
    pub cluster: usize,
    pub minimum_distance: f64,
}

impl VolatilityPoint {
    pub fn new(label: impl Into<String>, positive: f64, negative: f64) -> Self {
        Self {
            label: label.into(),
            positive_z_probability: positive,
            negative_z_probability: negative,
            cluster: 0,
            minimum_distance: 0.0,
        }
    }

    fn from_frequencies(label: String, frequencies: &[f64]) -> Option<Self> {
        match frequencies {
            [positive, negative] => Some(Self::new(label, *positive, *negative)),
            _ => None,
        }
    }

    /// Squared Euclidean distance; no square root is taken.
    pub fn compute_distance(&self, other: &VolatilityPoint) -> f64 {
        (other.positive_z_probability - self.positive_z_probability).powi(2)
            + (other.negative_z_probability - self.negative_z_probability).powi(2)
    }
}

/// Per-cluster accumulator, indexed by cluster id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub point_count: usize,
    pub x_sum: f64,
    pub y_sum: f64,
}

/// Centroid clustering over volatility corpus points.
///
/// Points' `cluster` and `minimum_distance` are rewritten in place by every
/// clustering pass; readers must not interleave with a pass.
#[derive(Debug, Clone)]
pub struct VolatilityModel {
    points: Vec<VolatilityPoint>,
    clusters: Vec<VolatilityPoint>,
    centroids: Vec<Centroid>,
    initial_minimum_distance: f64,
}

impl Default for VolatilityModel {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            clusters: Vec::new(),
            centroids: Vec::new(),
            initial_minimum_distance: f64::INFINITY,
        }
    }
}

impl VolatilityModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<VolatilityPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Minimum distance each point starts a clustering pass with. Zero means
    /// no point is ever reassigned away from cluster 0.
    pub fn with_initial_minimum_distance(mut self, distance: f64) -> Self {
        self.initial_minimum_distance = distance;
        self
    }

    pub fn from_corpus_text(text: &str) -> Self {
        let points = decode_corpus(MotifAlphabet::Volatility, text)
            .into_iter()
            .filter_map(|entry| VolatilityPoint::from_frequencies(entry.label, &entry.frequencies))
            .collect();
        Self::from_points(points)
    }

    pub fn validate_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SignalError::unreadable(path, e.to_string()))?;
        if text.trim().is_empty() {
            return Err(SignalError::unreadable(path, "file is empty"));
        }
        let model = Self::from_corpus_text(&text);
        info!("Volatility model loaded {} points from {}", model.points.len(), path.display());
        Ok(model)
    }

    pub fn generate_point(&mut self, label: &str, motif_line: &str) -> Result<()> {
        let frequencies = MotifAlphabet::Volatility.frequencies(motif_line).ok_or_else(|| {
            SignalError::DegenerateInput(format!("Not a volatility motif line: {:?}", motif_line))
        })?;
        if let Some(point) = VolatilityPoint::from_frequencies(label.to_string(), &frequencies) {
            self.points.push(point);
        }
        Ok(())
    }

    /// Picks `cluster_count` representatives uniformly at random (with
    /// replacement) and assigns each point to the first representative that
    /// beats its current minimum distance.
    pub fn assign_cluster_points<R: Rng + ?Sized>(&mut self, cluster_count: usize, rng: &mut R) -> Result<()> {
        let n = self.points.len();
        if n == 0 {
            return Err(SignalError::DegenerateInput(
                "Cannot cluster a model without points".to_string(),
            ));
        }

        self.clusters = (0..cluster_count)
            .map(|cluster_id| {
                let mut representative = self.points[rng.gen_range(0..n)].clone();
                representative.cluster = cluster_id;
                representative
            })
            .collect();

        for point in &mut self.points {
            point.cluster = 0;
            point.minimum_distance = self.initial_minimum_distance;
        }

        for (cluster_id, representative) in self.clusters.iter().enumerate() {
            for point in &mut self.points {
                let distance = representative.compute_distance(point);
                if distance < point.minimum_distance {
                    point.minimum_distance = distance;
                    point.cluster = cluster_id;
                }
            }
        }

        debug!("Assigned {} points to {} clusters", n, cluster_count);
        Ok(())
    }

    /// Rebuilds the centroid buckets and moves each cluster to its members' mean.
    ///
    /// Clusters keep the label of the representative they were seeded from.
    /// An empty cluster keeps its representative's coordinates too.
    pub fn update_centroid_data(&mut self) {
        self.centroids = vec![Centroid::default(); self.clusters.len()];

        for point in &self.points {
            if let Some(centroid) = self.centroids.get_mut(point.cluster) {
                centroid.point_count += 1;
                centroid.x_sum += point.positive_z_probability;
                centroid.y_sum += point.negative_z_probability;
            }
        }

        for (cluster, centroid) in self.clusters.iter_mut().zip(self.centroids.iter()) {
            if centroid.point_count == 0 {
                continue;
            }
            cluster.positive_z_probability = centroid.x_sum / centroid.point_count as f64;
            cluster.negative_z_probability = centroid.y_sum / centroid.point_count as f64;
        }
    }

    /// Label of the cluster nearest the query by summed absolute coordinate difference.
    pub fn nearest_cluster_label(&self, positive: f64, negative: f64) -> Option<&str> {
        let mut nearest: Option<(&VolatilityPoint, f64)> = None;
        for cluster in &self.clusters {
            let difference = (cluster.positive_z_probability - positive).abs()
                + (cluster.negative_z_probability - negative).abs();
            if nearest.map_or(true, |(_, best)| difference < best) {
                nearest = Some((cluster, difference));
            }
        }
        nearest.map(|(cluster, _)| cluster.label.as_str())
    }

    pub fn points(&self) -> &[VolatilityPoint] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn volatility_type(&self, index: usize) -> Result<&str> {
        Ok(&checked_get(&self.points, index)?.label)
    }

    pub fn positive_z_score_probability(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.positive_z_probability)
    }

    pub fn negative_z_score_probability(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.negative_z_probability)
    }

    pub fn minimum_distance(&self, index: usize) -> Result<f64> {
        Ok(checked_get(&self.points, index)?.minimum_distance)
    }

    pub fn cluster_value(&self, index: usize) -> Result<usize> {
        Ok(checked_get(&self.points, index)?.cluster)
    }

    pub fn cluster(&self, index: usize) -> Result<&VolatilityPoint> {
        checked_get(&self.clusters, index)
    }

    pub fn centroid(&self, index: usize) -> Result<Centroid> {
        checked_get(&self.centroids, index).copied()
    }
}

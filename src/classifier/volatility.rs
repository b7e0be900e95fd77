use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

use super::{parse_test_points, read_test_file, validation_accuracy};
use crate::error::{checked_get, Result, SignalError};
use crate::ml::{VolatilityModel, VolatilityPoint};

/// Scores a clustered volatility model against held-out (positive z, negative z) points.
#[derive(Debug, Clone, Default)]
pub struct VolatilityClassifier {
    testing_points: Vec<VolatilityPoint>,
}

impl VolatilityClassifier {
    pub fn from_points(testing_points: Vec<VolatilityPoint>) -> Self {
        Self { testing_points }
    }

    pub fn validate_file(path: &Path) -> Result<Self> {
        let text = read_test_file(path)?;
        let testing_points = parse_test_points(&text, 2, path)?
            .into_iter()
            .map(|p| VolatilityPoint::new(p.label, p.coordinates[0], p.coordinates[1]))
            .collect::<Vec<_>>();
        info!("Loaded {} volatility test points from {}", testing_points.len(), path.display());
        Ok(Self { testing_points })
    }

    /// Label of the cluster nearest `point`. The model must already be clustered.
    pub fn predict(model: &VolatilityModel, point: &VolatilityPoint) -> Option<String> {
        model
            .nearest_cluster_label(point.positive_z_probability, point.negative_z_probability)
            .map(str::to_string)
    }

    /// Clusters the model once, then checks every test point against its
    /// nearest cluster. Points are not reclustered between test points, so one
    /// seeded pass scores the whole set.
    pub fn calculate_validation_accuracy<R: Rng + ?Sized>(
        &self,
        model: &mut VolatilityModel,
        cluster_count: usize,
        rng: &mut R,
    ) -> Result<f64> {
        let total = self.testing_points.len();
        if total == 0 {
            return Err(SignalError::EmptyTestSet);
        }

        model.assign_cluster_points(cluster_count, rng)?;
        model.update_centroid_data();

        let mut correct = 0;
        for point in &self.testing_points {
            let predicted = Self::predict(model, point);
            debug!("Volatility expected {:?} predicted {:?}", point.label, predicted);
            if predicted.as_deref() == Some(point.label.as_str()) {
                correct += 1;
            }
        }

        let accuracy = validation_accuracy(correct, total)?;
        info!(
            "Volatility validation accuracy {:.1}% ({}/{}, clusters={})",
            accuracy * 100.0,
            correct,
            total,
            cluster_count
        );
        Ok(accuracy)
    }

    pub fn testing_point(&self, index: usize) -> Result<&VolatilityPoint> {
        checked_get(&self.testing_points, index)
    }

    pub fn testing_point_count(&self) -> usize {
        self.testing_points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn model() -> VolatilityModel {
        VolatilityModel::from_points(vec![
            VolatilityPoint::new("High Implied", 0.75, 0.25),
            VolatilityPoint::new("Low Historical", 0.1, 0.9),
            VolatilityPoint::new("High Implied", 0.7, 0.3),
            VolatilityPoint::new("Low Historical", 0.2, 0.8),
            VolatilityPoint::new("High Implied", 0.5, 0.5),
        ])
    }

    #[test]
    fn test_single_cluster_predicts_representative_label() {
        let mut model = model();
        let mut rng = StdRng::seed_from_u64(42);
        // Same seed, same representative.
        let mut seeded = model.clone();
        seeded.assign_cluster_points(1, &mut StdRng::seed_from_u64(42)).unwrap();
        let label = seeded.cluster(0).unwrap().label.clone();
        let other = if label == "High Implied" { "Low Historical" } else { "High Implied" };

        let classifier = VolatilityClassifier::from_points(vec![
            VolatilityPoint::new(label.as_str(), 0.6, 0.4),
            VolatilityPoint::new(other, 0.1, 0.9),
        ]);
        let accuracy = classifier.calculate_validation_accuracy(&mut model, 1, &mut rng).unwrap();
        assert_eq!(accuracy, 0.5);
        assert_eq!(model.cluster_count(), 1);
    }

    #[test]
    fn test_prediction_follows_cluster_seed_not_majority() {
        let mut model = VolatilityModel::from_points(vec![
            VolatilityPoint::new("Low Historical", 0.1, 0.9),
            VolatilityPoint::new("High Implied", 0.8, 0.2),
            VolatilityPoint::new("High Implied", 0.7, 0.3),
        ]);
        let mut rng = StdRng::seed_from_u64(2);
        loop {
            model.assign_cluster_points(1, &mut rng).unwrap();
            if model.cluster(0).unwrap().label == "Low Historical" {
                break;
            }
        }
        model.update_centroid_data();

        let point = VolatilityPoint::new("High Implied", 0.75, 0.25);
        assert_eq!(
            VolatilityClassifier::predict(&model, &point).as_deref(),
            Some("Low Historical")
        );
    }

    #[test]
    fn test_predict_before_clustering() {
        let model = model();
        let point = VolatilityPoint::new("High Implied", 0.6, 0.4);
        assert_eq!(VolatilityClassifier::predict(&model, &point), None);
    }

    #[test]
    fn test_empty_test_set() {
        let classifier = VolatilityClassifier::default();
        let mut model = model();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            classifier.calculate_validation_accuracy(&mut model, 2, &mut rng),
            Err(SignalError::EmptyTestSet)
        ));
    }

    #[test]
    fn test_empty_model_fails() {
        let classifier = VolatilityClassifier::from_points(vec![VolatilityPoint::new("High Implied", 0.6, 0.4)]);
        let mut model = VolatilityModel::new();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(classifier.calculate_validation_accuracy(&mut model, 2, &mut rng).is_err());
    }

    #[test]
    fn test_validate_file() {
        let dir = tempdir().unwrap();
        assert!(VolatilityClassifier::validate_file(&dir.path().join("fakefile.txt")).is_err());

        let path = dir.path().join("testvolatilitydata.txt");
        std::fs::write(&path, "Medium Historical\n0.45 0.55\n0.5 0.5\nLow Implied\n0.8 0.2\n").unwrap();
        let classifier = VolatilityClassifier::validate_file(&path).unwrap();
        assert_eq!(classifier.testing_point_count(), 3);
        assert_eq!(classifier.testing_point(1).unwrap().label, "Medium Historical");
        assert_eq!(classifier.testing_point(2).unwrap().positive_z_probability, 0.8);
        assert!(classifier.testing_point(3).is_err());
    }
}

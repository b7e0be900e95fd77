use std::path::Path;
use tracing::{debug, info};

use super::{parse_test_points, read_test_file, validation_accuracy};
use crate::error::{checked_get, Result, SignalError};
use crate::ml::{MomentumModel, MomentumPoint};

/// Scores a momentum model against held-out (increase, decrease, static) points.
#[derive(Debug, Clone, Default)]
pub struct MomentumClassifier {
    testing_points: Vec<MomentumPoint>,
}

impl MomentumClassifier {
    pub fn from_points(testing_points: Vec<MomentumPoint>) -> Self {
        Self { testing_points }
    }

    pub fn validate_file(path: &Path) -> Result<Self> {
        let text = read_test_file(path)?;
        let testing_points = parse_test_points(&text, 3, path)?
            .into_iter()
            .map(|p| MomentumPoint::new(p.label, p.coordinates[0], p.coordinates[1], p.coordinates[2]))
            .collect::<Vec<_>>();
        info!("Loaded {} momentum test points from {}", testing_points.len(), path.display());
        Ok(Self { testing_points })
    }

    /// Predicts the label whose stored distance lies closest to the model's
    /// k-nearest statistic for `point`. Earlier points win ties.
    pub fn predict(model: &mut MomentumModel, k: usize, point: &MomentumPoint) -> Result<Option<String>> {
        let statistic = model.compute_k_nearest_labels_average(
            k,
            point.price_increase_probability,
            point.price_decrease_probability,
            point.static_price_probability,
        )?;

        let mut nearest: Option<(&MomentumPoint, f64)> = None;
        for candidate in model.points() {
            let difference = (candidate.distance - statistic).abs();
            if nearest.map_or(true, |(_, best)| difference < best) {
                nearest = Some((candidate, difference));
            }
        }
        Ok(nearest.map(|(candidate, _)| candidate.label.clone()))
    }

    pub fn calculate_validation_accuracy(&self, model: &mut MomentumModel, k: usize) -> Result<f64> {
        let total = self.testing_points.len();
        if total == 0 {
            return Err(SignalError::EmptyTestSet);
        }

        let mut correct = 0;
        for point in &self.testing_points {
            let predicted = Self::predict(model, k, point)?;
            debug!("Momentum expected {:?} predicted {:?}", point.label, predicted);
            if predicted.as_deref() == Some(point.label.as_str()) {
                correct += 1;
            }
        }

        let accuracy = validation_accuracy(correct, total)?;
        info!("Momentum validation accuracy {:.1}% ({}/{}, k={})", accuracy * 100.0, correct, total, k);
        Ok(accuracy)
    }

    pub fn testing_point(&self, index: usize) -> Result<&MomentumPoint> {
        checked_get(&self.testing_points, index)
    }

    pub fn testing_point_count(&self) -> usize {
        self.testing_points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn corner_model() -> MomentumModel {
        MomentumModel::from_points(vec![
            MomentumPoint::new("Bullish Continuation", 1.0, 0.0, 0.0),
            MomentumPoint::new("Bearish Continuation", 0.0, 1.0, 0.0),
            MomentumPoint::new("Indecision None", 0.0, 0.0, 1.0),
            MomentumPoint::new("Bearish Reversal", 0.5, 0.5, 0.0),
        ])
    }

    #[test]
    fn test_predict_resolves_closest_distance() {
        let mut model = corner_model();
        let query = MomentumPoint::new("unknown", 1.0, 0.0, 0.0);
        // Statistic 4.5 is nearest the sqrt(2) distances; the first of them wins.
        let predicted = MomentumClassifier::predict(&mut model, 1, &query).unwrap();
        assert_eq!(predicted.as_deref(), Some("Bearish Continuation"));
    }

    #[test]
    fn test_validation_accuracy() {
        let classifier = MomentumClassifier::from_points(vec![
            MomentumPoint::new("Bearish Continuation", 1.0, 0.0, 0.0),
            MomentumPoint::new("Bullish Continuation", 1.0, 0.0, 0.0),
        ]);
        let mut model = corner_model();
        assert_eq!(classifier.calculate_validation_accuracy(&mut model, 1).unwrap(), 0.5);
    }

    #[test]
    fn test_empty_test_set() {
        let classifier = MomentumClassifier::default();
        let mut model = corner_model();
        assert!(matches!(
            classifier.calculate_validation_accuracy(&mut model, 1),
            Err(SignalError::EmptyTestSet)
        ));
    }

    #[test]
    fn test_validate_file() {
        let dir = tempdir().unwrap();
        assert!(MomentumClassifier::validate_file(&dir.path().join("fakefile.txt")).is_err());

        let path = dir.path().join("testmomentumdata.txt");
        std::fs::write(&path, "Bullish Reversal\n0.4 0.35 0.25\nIndecision None\n0.2 0.2 0.6\n").unwrap();
        let classifier = MomentumClassifier::validate_file(&path).unwrap();
        assert_eq!(classifier.testing_point_count(), 2);
        let point = classifier.testing_point(1).unwrap();
        assert_eq!(point.label, "Indecision None");
        assert_eq!(point.static_price_probability, 0.6);
        assert!(classifier.testing_point(2).is_err());
    }
}

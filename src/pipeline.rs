use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::classifier::{MomentumClassifier, VolatilityClassifier};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ml::{MomentumModel, VolatilityModel};
use crate::training::{MomentumTrainingDataFactory, VolatilityTrainingDataFactory};

/// Outcome of building both training corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub input_files: Vec<PathBuf>,
    pub momentum_output: PathBuf,
    pub momentum_entries: usize,
    pub volatility_output: PathBuf,
    pub volatility_entries: usize,
}

impl TrainingSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validation accuracy of both models against their held-out test files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub momentum_accuracy: f64,
    pub k: usize,
    pub momentum_training_points: usize,
    pub momentum_test_points: usize,
    pub volatility_accuracy: f64,
    pub cluster_count: usize,
    pub volatility_training_points: usize,
    pub volatility_test_points: usize,
}

impl EvaluationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub training: TrainingSummary,
    pub evaluation: EvaluationReport,
}

impl PipelineReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads every input file into both factories and writes the two corpora.
pub fn train(config: &PipelineConfig) -> Result<TrainingSummary> {
    info!("Training from {} price histories", config.input_files.len());

    let momentum = MomentumTrainingDataFactory::from_settings(&config.momentum)
        .validate_files(&config.input_files)?;
    let momentum_output = momentum.write_to_output_file()?;

    let volatility = VolatilityTrainingDataFactory::from_settings(&config.volatility)
        .validate_files(&config.input_files)?;
    let volatility_output = volatility.write_to_output_file()?;

    let summary = TrainingSummary {
        input_files: config.input_files.clone(),
        momentum_output,
        momentum_entries: momentum.entry_count(),
        volatility_output,
        volatility_entries: volatility.entry_count(),
    };
    info!(
        "Wrote {} momentum and {} volatility months",
        summary.momentum_entries, summary.volatility_entries
    );
    Ok(summary)
}

/// Loads both corpora and test sets from the configured paths and scores each model.
pub fn evaluate(config: &PipelineConfig) -> Result<EvaluationReport> {
    let mut momentum_model = MomentumModel::validate_file(&config.momentum.output_path)?;
    let momentum_classifier = MomentumClassifier::validate_file(&config.momentum.test_data_path)?;
    let momentum_accuracy =
        momentum_classifier.calculate_validation_accuracy(&mut momentum_model, config.momentum.k)?;

    let settings = &config.volatility;
    let mut volatility_model = VolatilityModel::validate_file(&settings.output_path)?
        .with_initial_minimum_distance(settings.initial_minimum_distance);
    let volatility_classifier = VolatilityClassifier::validate_file(&settings.test_data_path)?;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let volatility_accuracy = volatility_classifier.calculate_validation_accuracy(
        &mut volatility_model,
        settings.cluster_count,
        &mut rng,
    )?;

    Ok(EvaluationReport {
        momentum_accuracy,
        k: config.momentum.k,
        momentum_training_points: momentum_model.point_count(),
        momentum_test_points: momentum_classifier.testing_point_count(),
        volatility_accuracy,
        cluster_count: settings.cluster_count,
        volatility_training_points: volatility_model.point_count(),
        volatility_test_points: volatility_classifier.testing_point_count(),
    })
}

pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let training = train(config)?;
    let evaluation = evaluate(config)?;
    Ok(PipelineReport { training, evaluation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.input_files = vec![dir.join("prices.csv")];
        config.momentum.output_path = dir.join("data").join("momentumtrainingdata.txt");
        config.momentum.test_data_path = dir.join("testmomentumdata.txt");
        config.momentum.k = 1;
        config.volatility.output_path = dir.join("data").join("volatilitytrainingdata.txt");
        config.volatility.test_data_path = dir.join("testvolatilitydata.txt");
        config.volatility.cluster_count = 1;
        config
    }

    fn write_prices(dir: &Path) {
        std::fs::write(
            dir.join("prices.csv"),
            "Date,Open,High,Low,Close\n\
             2020-01-02,10,15,10,15\n\
             2020-01-03,14,14,10,10\n\
             2020-01-06,13,13,10,10\n\
             2020-01-07,10,12,10,12\n\
             2020-01-08,19,19,10,10\n\
             2020-02-03,5,5,0,0\n",
        )
        .unwrap();
    }

    #[test]
    fn test_train_writes_both_corpora() {
        let dir = tempdir().unwrap();
        write_prices(dir.path());
        let config = config_in(dir.path());

        let summary = train(&config).unwrap();
        assert_eq!(summary.momentum_entries, 1);
        assert_eq!(summary.volatility_entries, 1);
        assert_eq!(summary.momentum_output, config.momentum.output_path);

        let momentum = std::fs::read_to_string(&summary.momentum_output).unwrap();
        assert_eq!(momentum, "Bullish Continuation\n↘,↗,↗,↘,↗,\n");
        let volatility = std::fs::read_to_string(&summary.volatility_output).unwrap();
        assert_eq!(volatility.lines().count(), 2);
        assert!(summary.to_json().unwrap().contains("\"momentum_entries\": 1"));
    }

    #[test]
    fn test_run_scores_both_models() {
        let dir = tempdir().unwrap();
        write_prices(dir.path());
        let config = config_in(dir.path());

        std::fs::write(
            &config.momentum.test_data_path,
            "Bullish Continuation\n0.6 0.4 0.0\nBearish Reversal\n0.1 0.1 0.8\n",
        )
        .unwrap();

        // A single cluster always answers with the lone corpus month's label.
        train(&config).unwrap();
        let corpus = std::fs::read_to_string(&config.volatility.output_path).unwrap();
        let label = corpus.lines().next().unwrap().to_string();
        let other = if label == "Low Historical" { "High Implied" } else { "Low Historical" };
        std::fs::write(
            &config.volatility.test_data_path,
            format!("{}\n0.5 0.5\n{}\n0.5 0.5\n", label, other),
        )
        .unwrap();

        let report = run(&config).unwrap();
        assert_eq!(report.evaluation.momentum_accuracy, 0.5);
        assert_eq!(report.evaluation.momentum_training_points, 1);
        assert_eq!(report.evaluation.momentum_test_points, 2);
        assert_eq!(report.evaluation.volatility_accuracy, 0.5);
        assert_eq!(report.evaluation.volatility_test_points, 2);

        let json = report.to_json().unwrap();
        let parsed: PipelineReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_evaluate_requires_training_output() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(matches!(evaluate(&config), Err(SignalError::FileUnreadable { .. })));
    }

    #[test]
    fn test_train_requires_readable_input() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(matches!(train(&config), Err(SignalError::FileUnreadable { .. })));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Daily price CSV files, read in order into one corpus per signal.
    pub input_files: Vec<PathBuf>,
    pub momentum: MomentumSettings,
    pub volatility: VolatilitySettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_files: vec![PathBuf::from("data/acciona.csv")],
            momentum: MomentumSettings::default(),
            volatility: VolatilitySettings::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.input_files.is_empty() {
            errors.push("input_files must list at least one price history".to_string());
        }

        // Momentum validation
        if self.momentum.k == 0 {
            errors.push("momentum: k must be > 0".to_string());
        }
        if self.momentum.output_path.as_os_str().is_empty() {
            errors.push("momentum: output_path must not be empty".to_string());
        }

        // Volatility validation
        if self.volatility.cluster_count == 0 {
            errors.push("volatility: cluster_count must be > 0".to_string());
        }
        if self.volatility.initial_minimum_distance.is_nan()
            || self.volatility.initial_minimum_distance < 0.0
        {
            errors.push("volatility: initial_minimum_distance must be >= 0".to_string());
        }
        if self.volatility.output_path.as_os_str().is_empty() {
            errors.push("volatility: output_path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Options shared by both training data factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryOptions {
    /// Add the still-open series at end of input to the corpus.
    pub flush_trailing_series: bool,
    /// Drop a month whose series exactly repeats one already in the corpus.
    pub deduplicate_series: bool,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            flush_trailing_series: false,
            deduplicate_series: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumSettings {
    pub output_path: PathBuf,
    pub test_data_path: PathBuf,
    /// Neighbour count for the nearest-neighbour statistic.
    pub k: usize,
    pub flush_trailing_series: bool,
    pub deduplicate_series: bool,
}

impl Default for MomentumSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/momentumtrainingdata.txt"),
            test_data_path: PathBuf::from("data/testmomentumdata.txt"),
            k: 5,
            flush_trailing_series: false,
            deduplicate_series: true,
        }
    }
}

impl MomentumSettings {
    pub fn factory_options(&self) -> FactoryOptions {
        FactoryOptions {
            flush_trailing_series: self.flush_trailing_series,
            deduplicate_series: self.deduplicate_series,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilitySettings {
    pub output_path: PathBuf,
    pub test_data_path: PathBuf,
    pub cluster_count: usize,
    /// Seed for picking initial cluster representatives.
    pub seed: u64,
    /// Starting minimum distance of every point before a clustering pass.
    /// Zero leaves every point in cluster 0.
    pub initial_minimum_distance: f64,
    pub flush_trailing_series: bool,
    pub deduplicate_series: bool,
}

impl Default for VolatilitySettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/volatilitytrainingdata.txt"),
            test_data_path: PathBuf::from("data/testvolatilitydata.txt"),
            cluster_count: 5,
            seed: 42,
            initial_minimum_distance: f64::INFINITY,
            flush_trailing_series: false,
            deduplicate_series: true,
        }
    }
}

impl VolatilitySettings {
    pub fn factory_options(&self) -> FactoryOptions {
        FactoryOptions {
            flush_trailing_series: self.flush_trailing_series,
            deduplicate_series: self.deduplicate_series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.momentum.k, 5);
        assert_eq!(config.volatility.cluster_count, 5);
        assert!(config.volatility.initial_minimum_distance.is_infinite());
        assert_eq!(
            config.momentum.output_path,
            PathBuf::from("data/momentumtrainingdata.txt")
        );
    }

    #[test]
    fn test_validation_collects_every_error() {
        let mut config = PipelineConfig::default();
        config.input_files.clear();
        config.momentum.k = 0;
        config.volatility.cluster_count = 0;
        config.volatility.initial_minimum_distance = -1.0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_factory_options_follow_settings() {
        let settings = VolatilitySettings {
            flush_trailing_series: true,
            deduplicate_series: false,
            ..VolatilitySettings::default()
        };
        let options = settings.factory_options();
        assert!(options.flush_trailing_series);
        assert!(!options.deduplicate_series);
        assert_eq!(FactoryOptions::default(), MomentumSettings::default().factory_options());
    }
}

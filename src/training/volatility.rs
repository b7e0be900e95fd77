use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::TrainingCorpus;
use crate::config::{FactoryOptions, VolatilitySettings};
use crate::data::{read_price_rows, MonthlySeries};
use crate::error::{checked_get, Result};
use crate::indicators::{Calculator, VolatilityCalculator};
use crate::ml::motif::MotifAlphabet;
use crate::types::{DailyPrice, PriceRow, Volatility};

/// Groups daily quartile prices by month, labels each month's volatility and
/// keeps the standardized series for motif encoding.
pub struct VolatilityTrainingDataFactory {
    options: FactoryOptions,
    output_path: PathBuf,
    calculator: VolatilityCalculator,
    daily_prices: Vec<DailyPrice>,
    series: MonthlySeries,
    corpus: TrainingCorpus<Volatility>,
}

impl VolatilityTrainingDataFactory {
    pub fn new(options: FactoryOptions, output_path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            output_path: output_path.into(),
            calculator: VolatilityCalculator::new(),
            daily_prices: Vec::new(),
            series: MonthlySeries::new(),
            corpus: TrainingCorpus::new(options.deduplicate_series),
        }
    }

    pub fn from_settings(settings: &VolatilitySettings) -> Self {
        Self::new(settings.factory_options(), settings.output_path.clone())
    }

    pub fn validate_files<P: AsRef<Path>>(mut self, paths: &[P]) -> Result<Self> {
        for path in paths {
            self.ingest_file(path.as_ref())?;
        }
        self.finish()?;
        Ok(self)
    }

    pub fn ingest_file(&mut self, path: &Path) -> Result<usize> {
        let rows = read_price_rows(path)?;
        self.series.start_file();
        self.ingest_rows(&rows)?;
        Ok(rows.len())
    }

    pub fn ingest_rows(&mut self, rows: &[PriceRow]) -> Result<()> {
        for row in rows {
            self.daily_prices.push(row.price);
            let quartile_price = self.calculator.daily_quartile_price(&row.price);
            if let Some(completed) = self.series.push(row.month(), quartile_price) {
                self.record(completed)?;
            }
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.options.flush_trailing_series {
            if let Some(trailing) = self.series.take_trailing() {
                self.record(trailing)?;
            }
        } else if !self.series.pending().is_empty() {
            debug!("Leaving {} trailing quartile prices out of the corpus", self.series.pending().len());
        }
        Ok(())
    }

    fn record(&mut self, quartile_prices: Vec<f64>) -> Result<()> {
        let volatility = self.calculator.identify(&quartile_prices)?;
        let standardized = self.calculator.standardize_quartile_prices(&quartile_prices);
        debug!("Month of {} days labelled {}", quartile_prices.len(), volatility);
        self.corpus.insert(standardized, volatility);
        Ok(())
    }

    pub fn encode(&self) -> String {
        self.corpus.encode(MotifAlphabet::Volatility)
    }

    pub fn write_to_output_file(&self) -> Result<PathBuf> {
        info!("Writing volatility training data ({} months)", self.corpus.len());
        self.corpus.write(MotifAlphabet::Volatility, &self.output_path)
    }

    pub fn entry_count(&self) -> usize {
        self.corpus.len()
    }

    pub fn volatility(&self, index: usize) -> Result<Volatility> {
        Ok(self.corpus.get(index)?.label)
    }

    pub fn standardized_quartile_prices(&self, index: usize) -> Result<&[f64]> {
        Ok(&self.corpus.get(index)?.series)
    }

    pub fn daily_price(&self, index: usize) -> Result<DailyPrice> {
        checked_get(&self.daily_prices, index).copied()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

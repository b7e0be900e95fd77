use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::TrainingCorpus;
use crate::config::{FactoryOptions, MomentumSettings};
use crate::data::{read_price_rows, MonthlySeries};
use crate::error::Result;
use crate::indicators::{Calculator, MomentumCalculator};
use crate::ml::motif::MotifAlphabet;
use crate::types::{Momentum, PriceRow};

/// Groups daily price differences by month and labels each month's momentum.
pub struct MomentumTrainingDataFactory {
    options: FactoryOptions,
    output_path: PathBuf,
    calculator: MomentumCalculator,
    series: MonthlySeries,
    corpus: TrainingCorpus<Momentum>,
}

impl MomentumTrainingDataFactory {
    pub fn new(options: FactoryOptions, output_path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            output_path: output_path.into(),
            calculator: MomentumCalculator::new(),
            series: MonthlySeries::new(),
            corpus: TrainingCorpus::new(options.deduplicate_series),
        }
    }

    pub fn from_settings(settings: &MomentumSettings) -> Self {
        Self::new(settings.factory_options(), settings.output_path.clone())
    }

    /// Reads every file into this factory, in order, then closes the input.
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
            if let Some(completed) = self.series.push(row.month(), row.price.price_difference()) {
                self.record(completed)?;
            }
        }
        Ok(())
    }

    /// Ends input. The open month is kept only with `flush_trailing_series`.
    pub fn finish(&mut self) -> Result<()> {
        if self.options.flush_trailing_series {
            if let Some(trailing) = self.series.take_trailing() {
                self.record(trailing)?;
            }
        } else if !self.series.pending().is_empty() {
            debug!("Leaving {} trailing price differences out of the corpus", self.series.pending().len());
        }
        Ok(())
    }

    fn record(&mut self, price_differences: Vec<f64>) -> Result<()> {
        let momentum = self.calculator.identify(&price_differences)?;
        debug!("Month of {} days labelled {}", price_differences.len(), momentum);
        self.corpus.insert(price_differences, momentum);
        Ok(())
    }

    pub fn encode(&self) -> String {
        self.corpus.encode(MotifAlphabet::Momentum)
    }

    pub fn write_to_output_file(&self) -> Result<PathBuf> {
        info!("Writing momentum training data ({} months)", self.corpus.len());
        self.corpus.write(MotifAlphabet::Momentum, &self.output_path)
    }

    pub fn entry_count(&self) -> usize {
        self.corpus.len()
    }

    pub fn momentum(&self, index: usize) -> Result<Momentum> {
        Ok(self.corpus.get(index)?.label)
    }

    pub fn price_differences(&self, index: usize) -> Result<&[f64]> {
        Ok(&self.corpus.get(index)?.series)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

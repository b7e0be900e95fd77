pub mod momentum;
pub mod volatility;

pub use momentum::MomentumTrainingDataFactory;
pub use volatility::VolatilityTrainingDataFactory;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{checked_get, Result};
use crate::ml::motif::{encode_corpus, MotifAlphabet};

/// One month's series and the label derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry<L> {
    pub series: Vec<f64>,
    pub label: L,
}

/// Ordered (series, label) entries awaiting persistence.
///
/// With deduplication on, a series identical to one already held is dropped
/// and the first label is kept.
#[derive(Debug, Clone)]
pub struct TrainingCorpus<L> {
    entries: Vec<CorpusEntry<L>>,
    deduplicate: bool,
}

impl<L> TrainingCorpus<L> {
    pub fn new(deduplicate: bool) -> Self {
        Self {
            entries: Vec::new(),
            deduplicate,
        }
    }

    /// Returns false when the entry was dropped as a duplicate. `NaN` values
    /// compare equal to each other here.
    pub fn insert(&mut self, series: Vec<f64>, label: L) -> bool {
        if self.deduplicate && self.entries.iter().any(|e| same_series(&e.series, &series)) {
            debug!("Dropping duplicate series of {} values", series.len());
            return false;
        }
        self.entries.push(CorpusEntry { series, label });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&CorpusEntry<L>> {
        checked_get(&self.entries, index)
    }

    pub fn entries(&self) -> &[CorpusEntry<L>] {
        &self.entries
    }
}

impl<L: Display> TrainingCorpus<L> {
    pub fn encode(&self, alphabet: MotifAlphabet) -> String {
        encode_corpus(
            alphabet,
            self.entries.iter().map(|e| (&e.label, e.series.as_slice())),
        )
    }

    /// Writes the encoded corpus, creating parent directories, and returns the path.
    pub fn write(&self, alphabet: MotifAlphabet, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.encode(alphabet))?;
        info!("Wrote {} corpus entries to {}", self.entries.len(), path.display());
        Ok(path.to_path_buf())
    }
}

fn same_series(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.total_cmp(y).is_eq())
}

use std::fmt::Display;
use tracing::warn;

pub const UPWARD_TREND: char = '↗';
pub const DOWNWARD_TREND: char = '↘';
pub const STATIC_TREND: char = '-';
pub const POSITIVE_Z_SCORE: char = '+';
pub const NEGATIVE_Z_SCORE: char = '-';
pub const SEPARATOR: char = ',';

/// Symbol sets used to persist a numeric series as one character per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifAlphabet {
    /// Up, down or flat day.
    Momentum,
    /// Non-negative or negative z-score.
    Volatility,
}

impl MotifAlphabet {
    pub fn symbols(&self) -> &'static [char] {
        match self {
            MotifAlphabet::Momentum => &[UPWARD_TREND, DOWNWARD_TREND, STATIC_TREND],
            MotifAlphabet::Volatility => &[POSITIVE_Z_SCORE, NEGATIVE_Z_SCORE],
        }
    }

    pub fn encode_value(&self, value: f64) -> char {
        match self {
            MotifAlphabet::Momentum => {
                if value > 0.0 {
                    UPWARD_TREND
                } else if value < 0.0 {
                    DOWNWARD_TREND
                } else {
                    STATIC_TREND
                }
            }
            // A zero z-score counts as positive; an undefined one does not.
            MotifAlphabet::Volatility => {
                if value >= 0.0 {
                    POSITIVE_Z_SCORE
                } else {
                    NEGATIVE_Z_SCORE
                }
            }
        }
    }

    /// One symbol per value, each followed by the separator.
    pub fn encode_series(&self, series: &[f64]) -> String {
        let mut line = String::with_capacity(series.len() * 4);
        for &value in series {
            line.push(self.encode_value(value));
            line.push(SEPARATOR);
        }
        line
    }

    /// Frequency of each symbol, in `symbols()` order, over the symbols of `line`.
    ///
    /// Separators are ignored. Returns `None` when the line holds no symbols
    /// or any character outside the alphabet.
    pub fn frequencies(&self, line: &str) -> Option<Vec<f64>> {
        let symbols = self.symbols();
        let mut counts = vec![0usize; symbols.len()];
        let mut total = 0usize;

        for c in line.chars().filter(|c| *c != SEPARATOR && !c.is_whitespace()) {
            let slot = symbols.iter().position(|s| *s == c)?;
            counts[slot] += 1;
            total += 1;
        }

        if total == 0 {
            return None;
        }
        Some(counts.into_iter().map(|c| c as f64 / total as f64).collect())
    }
}

/// Label and motif frequencies recovered from one corpus entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry {
    pub label: String,
    pub frequencies: Vec<f64>,
}

/// Writes a label line followed by a motif line for every entry.
pub fn encode_corpus<'a, L, I>(alphabet: MotifAlphabet, entries: I) -> String
where
    L: Display + 'a,
    I: IntoIterator<Item = (&'a L, &'a [f64])>,
{
    let mut output = String::new();
    for (label, series) in entries {
        output.push_str(&label.to_string());
        output.push('\n');
        output.push_str(&alphabet.encode_series(series));
        output.push('\n');
    }
    output
}

/// Reads corpus text back into labelled frequency vectors.
///
/// Motif lines become entries carrying the most recent label line; any other
/// non-blank line replaces that pending label.
pub fn decode_corpus(alphabet: MotifAlphabet, text: &str) -> Vec<DecodedEntry> {
    let mut entries = Vec::new();
    let mut pending_label = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match alphabet.frequencies(line) {
            Some(frequencies) => {
                if pending_label.is_empty() {
                    warn!("Motif line without a preceding label");
                }
                entries.push(DecodedEntry {
                    label: pending_label.clone(),
                    frequencies,
                });
            }
            None => pending_label = line.to_string(),
        }
    }

    entries
}

pub mod momentum;
pub mod volatility;

pub use momentum::MomentumClassifier;
pub use volatility::VolatilityClassifier;

use std::path::Path;

use crate::error::{Result, SignalError};

/// A labelled coordinate vector read from a held-out test file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestPoint {
    pub label: String,
    pub coordinates: Vec<f64>,
}

pub(crate) fn read_test_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SignalError::unreadable(path, e.to_string()))?;
    if text.trim().is_empty() {
        return Err(SignalError::unreadable(path, "file is empty"));
    }
    Ok(text)
}

/// Parses alternating label lines (starting with a letter) and lines of
/// space-separated coordinates. Each coordinate line becomes one point under
/// the most recent label; only the first `dimensions` values are used.
pub fn parse_test_points(text: &str, dimensions: usize, source: &Path) -> Result<Vec<TestPoint>> {
    let mut points = Vec::new();
    let mut label: Option<String> = None;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        if first.is_alphabetic() {
            label = Some(line.to_string());
            continue;
        }

        let malformed = |reason: String| SignalError::MalformedLine {
            path: source.to_path_buf(),
            line: number + 1,
            reason,
        };

        let coordinates = line
            .split_whitespace()
            .take(dimensions)
            .map(|field| field.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| malformed(e.to_string()))?;
        if coordinates.len() < dimensions {
            return Err(malformed(format!(
                "expected {} coordinates, found {}",
                dimensions,
                coordinates.len()
            )));
        }
        let label = label
            .clone()
            .ok_or_else(|| malformed("coordinates before any label".to_string()))?;

        points.push(TestPoint { label, coordinates });
    }

    Ok(points)
}

/// Fraction of correct predictions. An empty test set is an error rather than `NaN`.
pub fn validation_accuracy(correct: usize, total: usize) -> Result<f64> {
    if total == 0 {
        return Err(SignalError::EmptyTestSet);
    }
    Ok(correct as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_test_points() {
        let text = "Bullish Continuation\n0.5 0.25 0.25\n0.4 0.4 0.2\n\nIndecision None\n0.1 0.1 0.8 extra\n";
        let points = parse_test_points(text, 3, Path::new("test.txt")).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].label, "Bullish Continuation");
        assert_eq!(points[1].coordinates, vec![0.4, 0.4, 0.2]);
        assert_eq!(points[2].label, "Indecision None");
        assert_eq!(points[2].coordinates, vec![0.1, 0.1, 0.8]);
    }

    #[test]
    fn test_parse_rejects_short_or_unlabelled_lines() {
        let short = parse_test_points("High Implied\n0.5\n", 2, Path::new("t.txt"));
        assert!(matches!(short, Err(SignalError::MalformedLine { line: 2, .. })));

        let unlabelled = parse_test_points("0.5 0.5\n", 2, Path::new("t.txt"));
        assert!(matches!(unlabelled, Err(SignalError::MalformedLine { line: 1, .. })));

        let garbage = parse_test_points("High Implied\n0.5 x\n", 2, Path::new("t.txt"));
        assert!(garbage.is_err());
    }

    #[test]
    fn test_validation_accuracy() {
        assert_eq!(validation_accuracy(3, 4).unwrap(), 0.75);
        assert!(matches!(validation_accuracy(0, 0), Err(SignalError::EmptyTestSet)));
    }
}

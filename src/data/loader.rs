use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, info};

use super::{
    CLOSING_PRICE_INDEX, DATE_FORMAT, DATE_INDEX, HIGH_PRICE_INDEX, LOW_PRICE_INDEX,
    OPENING_PRICE_INDEX,
};
use crate::error::{Result, SignalError};
use crate::types::{DailyPrice, PriceRow};

/// Reads every dated price row of a CSV file in file order.
///
/// The first record is treated as a header and skipped when its date column
/// does not parse. A file that cannot be opened or holds no records is
/// reported as unreadable.
pub fn read_price_rows(path: &Path) -> Result<Vec<PriceRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| SignalError::unreadable(path, e.to_string()))?;

    let mut rows = Vec::new();
    let mut seen_records = 0usize;

    for result in reader.records() {
        let record = result?;
        seen_records += 1;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(seen_records);

        let Some(date) = parse_date(&record) else {
            if seen_records == 1 {
                debug!("Skipping header row of {}", path.display());
                continue;
            }
            return Err(malformed(path, line, "date column is not YYYY-MM-DD"));
        };

        let price = DailyPrice {
            opening: parse_price(&record, OPENING_PRICE_INDEX, path, line)?,
            closing: parse_price(&record, CLOSING_PRICE_INDEX, path, line)?,
            high: parse_price(&record, HIGH_PRICE_INDEX, path, line)?,
            low: parse_price(&record, LOW_PRICE_INDEX, path, line)?,
        };
        rows.push(PriceRow { date, price });
    }

    if seen_records == 0 {
        return Err(SignalError::unreadable(path, "file is empty"));
    }

    info!("Loaded {} price rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn parse_date(record: &StringRecord) -> Option<NaiveDate> {
    let field = record.get(DATE_INDEX)?;
    NaiveDate::parse_from_str(field, DATE_FORMAT).ok()
}

fn parse_price(record: &StringRecord, index: usize, path: &Path, line: usize) -> Result<f64> {
    let field = record
        .get(index)
        .ok_or_else(|| malformed(path, line, &format!("missing column {}", index)))?;
    field
        .parse::<f64>()
        .map_err(|_| malformed(path, line, &format!("column {} is not a number: {:?}", index, field)))
}

fn malformed(path: &Path, line: usize, reason: &str) -> SignalError {
    SignalError::MalformedLine {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    }
}

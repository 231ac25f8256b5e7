//! CSV ingest and normalization.
//!
//! Turns an arbitrary sales export into a clean date/amount series.
//!
//! Design goals:
//! - **Heuristic column detection**: date and amount columns are found by a
//!   fixed, case-insensitive candidate list; the first column is the
//!   fallback when nothing matches
//! - **Row-level tolerance**: rows with unparseable dates or amounts are
//!   dropped and counted, never defaulted
//! - **Deterministic behavior**: output is sorted by date; no hidden
//!   randomness
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::Record;
use crate::error::AppError;

/// Candidate header names for the date column, in priority order.
const DATE_CANDIDATES: &[&str] = &["date", "날짜", "일자", "order_date", "created_at"];

/// Candidate header names for the amount column, in priority order.
const AMOUNT_CANDIDATES: &[&str] = &["amount", "매출", "매출액", "sales", "sales_amount", "revenue"];

/// Date formats tried in order. ISO first; timestamp formats keep only the
/// calendar date.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Ingest output: the series plus enough bookkeeping to report what was
/// read, what was picked, and what was dropped.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    /// Records sorted by date (duplicates allowed; gaps allowed).
    pub records: Vec<Record>,
    pub date_column: String,
    pub amount_column: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Load a CSV into a date/amount series.
///
/// Fails (exit 1) when the file cannot be read or when no usable rows
/// remain after dropping unparseable ones.
pub fn load_series(path: &Path) -> Result<IngestedSeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::load(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::load(format!("Failed to read CSV headers: {e}")))?
        .clone();

    if headers.is_empty() {
        return Err(AppError::load("CSV has no header row."));
    }

    let date_idx = pick_column(&headers, DATE_CANDIDATES);
    let amount_idx = pick_column(&headers, AMOUNT_CANDIDATES);

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for result in reader.records() {
        rows_read += 1;
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                rows_dropped += 1;
                continue;
            }
        };

        let date = record.get(date_idx).and_then(parse_date);
        let amount = record.get(amount_idx).and_then(parse_amount);

        match (date, amount) {
            (Some(date), Some(amount)) => records.push(Record { date, amount }),
            _ => rows_dropped += 1,
        }
    }

    if records.is_empty() {
        return Err(AppError::load(format!(
            "No usable rows in '{}': {rows_read} read, {rows_dropped} dropped \
             (unparseable date or amount).",
            path.display()
        )));
    }

    records.sort_by_key(|r| r.date);

    Ok(IngestedSeries {
        records,
        date_column: headers.get(date_idx).unwrap_or("").to_string(),
        amount_column: headers.get(amount_idx).unwrap_or("").to_string(),
        rows_read,
        rows_dropped,
    })
}

/// Find the first candidate present among the headers (case-insensitive,
/// BOM-stripped), defaulting to the first column.
fn pick_column(headers: &StringRecord, candidates: &[&str]) -> usize {
    let lower: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    for cand in candidates {
        if let Some(&idx) = lower.get(*cand) {
            return idx;
        }
    }
    0
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "\u{feff}date"). If we don't strip it, column
    // detection silently falls back to the first column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if fmt.contains("%H") {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        } else if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    None
}

fn parse_amount(raw: &str) -> Option<f64> {
    // Tolerate thousands separators ("1,234.5").
    let cleaned: String = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

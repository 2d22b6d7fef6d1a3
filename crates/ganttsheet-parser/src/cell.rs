//! Raw cell values and the date normalizer.
//!
//! Tabular sources are heterogeneous: a date column may hold a spreadsheet
//! serial number, an ISO string, or a day-first string. [`date_from_cell`]
//! resolves all of these to a calendar date and never errors; absence of a
//! valid date is a `None` that callers turn into a reported row error.

use chrono::{DateTime, NaiveDate};

/// Days between the spreadsheet serial epoch (1899-12-30) and the Unix epoch.
const SERIAL_EPOCH_OFFSET: f64 = 25569.0;

/// Text date formats tried in order: ISO first, then day-first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// One raw cell value from a tabular source.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Classify one text field: empty, numeric, or plain text.
    ///
    /// Numeric classification is what lets serial day-counts survive a trip
    /// through CSV, where every field arrives as a string.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return Self::Number(n);
        }
        Self::Text(trimmed.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// String form of the cell, `None` when empty.
    ///
    /// Whole numbers drop their fractional part so a numeric task label
    /// renders as `42`, not `42.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Numeric form of the cell, `None` when it has none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Normalize one raw cell into a calendar date.
///
/// - `Date` cells pass through.
/// - Numbers are spreadsheet serial day-counts ("days since 1899-12-30");
///   time-of-day is truncated.
/// - Text tries ISO (`%Y-%m-%d`, `%Y/%m/%d`) first, then day-first
///   `D/M/YYYY` and `D-M-YYYY`.
/// - Everything else is `None`.
pub fn date_from_cell(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(serial) => date_from_serial(*serial),
        Cell::Text(s) => date_from_text(s),
        Cell::Empty => None,
    }
}

fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let secs = ((serial - SERIAL_EPOCH_OFFSET) * 86_400.0).floor() as i64;
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

fn date_from_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

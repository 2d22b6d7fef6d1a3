//! # ganttsheet-parser
//!
//! Tabular input parsing for ganttsheet.
//!
//! This crate provides:
//! - Cell classification and the date normalizer (serials, ISO, day-first)
//! - The row parser: synonym-resolved columns to typed `TaskRecord`s
//! - CSV/TSV reading with delimiter auto-detection
//!
//! ## Example
//!
//! ```rust
//! use ganttsheet_parser::parse_str;
//!
//! let input = "\
//! Task,Start Date,End Date,Parent,Progress
//! Design Phase,2025-03-06,2025-03-20,,0.4
//! UI Design,2025-03-06,2025-03-12,Design Phase,80
//! ";
//!
//! let records = parse_str(input).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].progress, 0.8);
//! ```

pub mod cell;
pub mod rows;

pub use cell::{date_from_cell, Cell};
pub use rows::{parse_rows, SheetRow};

use std::path::Path;

use ganttsheet_core::TaskRecord;
use thiserror::Error;

/// Parsing error. Every variant rejects the whole upload; there is no
/// partial load.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("the input file has no data rows")]
    EmptyInput,

    #[error("invalid or missing start/end date at row {row}")]
    MissingDate { row: usize },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed input: {0}")]
    Malformed(#[from] csv::Error),
}

/// Detect the field delimiter by counting candidates in the header line.
///
/// Candidate order settles ties: semicolon first (European exports), then
/// tab, then comma.
fn detect_delimiter(first_line: &str) -> u8 {
    let mut best = (0usize, b';');
    for delimiter in [b';', b'\t', b','] {
        let count = first_line.bytes().filter(|&b| b == delimiter).count();
        if count > best.0 {
            best = (count, delimiter);
        }
    }
    best.1
}

/// Read delimiter-detected tabular text into header/cell rows.
fn read_sheet(content: &str) -> Result<Vec<SheetRow>, ParseError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    let mut sheet = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = SheetRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row = row.push(header, Cell::from_field(field));
        }
        sheet.push(row);
    }
    Ok(sheet)
}

/// Parse tabular text (CSV, TSV, or semicolon-separated) into task records.
pub fn parse_str(content: &str) -> Result<Vec<TaskRecord>, ParseError> {
    let sheet = read_sheet(content)?;
    parse_rows(&sheet)
}

/// Parse a tabular file from a path.
pub fn parse_file(path: &Path) -> Result<Vec<TaskRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

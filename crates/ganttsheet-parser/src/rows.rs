//! Row parser: heterogeneous records to typed task records.
//!
//! Column resolution works over ordered synonym lists and takes the first
//! present, non-empty value. The transform is pure and all-or-nothing: one
//! bad date rejects the whole upload with the offending spreadsheet row.

use ganttsheet_core::{palette_color, TaskRecord, DEFAULT_ASSIGNEE};

use crate::cell::{date_from_cell, Cell};
use crate::ParseError;

const NAME_KEYS: &[&str] = &["Task", "task", "Name"];
const PARENT_KEYS: &[&str] = &["Parent", "parent"];
const START_KEYS: &[&str] = &["Start Date", "start", "Start"];
const END_KEYS: &[&str] = &["End Date", "end", "End"];
const PROGRESS_KEYS: &[&str] = &["Progress", "progress"];
const ASSIGNEE_KEYS: &[&str] = &["Assignee", "Owner", "Person"];
const COLOR_KEYS: &[&str] = &["Color"];

/// One input record: header/cell pairs in source column order.
///
/// Unknown columns simply never match a synonym list and are ignored.
#[derive(Clone, Debug, Default)]
pub struct SheetRow {
    cells: Vec<(String, Cell)>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell under the given header
    pub fn push(mut self, header: impl Into<String>, cell: Cell) -> Self {
        self.cells.push((header.into(), cell));
        self
    }

    /// Exact-match lookup of a single header
    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, c)| c)
    }

    /// First present, non-empty cell across an ordered synonym list
    fn resolve(&self, synonyms: &[&str]) -> Option<&Cell> {
        synonyms
            .iter()
            .filter_map(|key| self.get(key))
            .find(|cell| !cell.is_empty())
    }
}

/// Parse a sheet's data rows into task records.
///
/// Row numbers in errors are 1-indexed spreadsheet rows: data row `i` lives
/// under the header row, at row `i + 2`.
pub fn parse_rows(rows: &[SheetRow]) -> Result<Vec<TaskRecord>, ParseError> {
    if rows.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let start = row.resolve(START_KEYS).and_then(date_from_cell);
        let end = row.resolve(END_KEYS).and_then(date_from_cell);
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ParseError::MissingDate { row: index + 2 });
        };

        let name = row
            .resolve(NAME_KEYS)
            .and_then(Cell::as_text)
            .unwrap_or_else(|| format!("Task {}", index + 1));

        let mut record = TaskRecord::new(index, name, start, end);

        if let Some(parent) = row.resolve(PARENT_KEYS).and_then(Cell::as_text) {
            record = record.parent(parent);
        }
        if let Some(raw) = row.resolve(PROGRESS_KEYS).and_then(Cell::as_number) {
            // Inputs use either 0–1 fractions or 0–100 percentages
            let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
            record = record.progress(fraction as f32);
        }
        if let Some(assignee) = row.resolve(ASSIGNEE_KEYS).and_then(Cell::as_text) {
            record = record.assignee(assignee);
        } else {
            record = record.assignee(DEFAULT_ASSIGNEE);
        }
        if let Some(color) = row.resolve(COLOR_KEYS).and_then(Cell::as_text) {
            record = record.color(color);
        } else {
            record = record.color(palette_color(index));
        }

        records.push(record);
    }
    Ok(records)
}

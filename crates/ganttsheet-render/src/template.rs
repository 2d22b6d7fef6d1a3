//! Sample template writers.
//!
//! The upload flow is easiest to explain with a downloadable starting point,
//! so both views ship a small sample schedule: XLSX for spreadsheet users,
//! CSV for everyone else. The CSV form re-parses losslessly through the row
//! parser (modulo generated ids).

use rust_xlsxwriter::Workbook;

use crate::RenderError;

/// Gantt template columns
pub const GANTT_HEADERS: [&str; 5] = ["Task", "Start Date", "End Date", "Parent", "Progress"];
/// Workload template columns
pub const WORKLOAD_HEADERS: [&str; 4] = ["Task", "Start Date", "End Date", "Assignee"];

/// Gantt sample rows: (task, start, end, parent, progress)
pub const GANTT_SAMPLE: [(&str, &str, &str, &str, f64); 5] = [
    ("Project Kickoff", "2025-03-01", "2025-03-05", "", 1.0),
    ("Design Phase", "2025-03-06", "2025-03-20", "", 0.4),
    ("UI Design", "2025-03-06", "2025-03-12", "Design Phase", 0.8),
    ("UX Prototyping", "2025-03-13", "2025-03-20", "Design Phase", 0.2),
    ("Development", "2025-03-21", "2025-04-15", "", 0.1),
];

/// Workload sample rows: (task, start, end, assignee)
pub const WORKLOAD_SAMPLE: [(&str, &str, &str, &str); 4] = [
    ("Frontend Dev", "2025-04-01", "2025-04-10", "Alex"),
    ("API Integration", "2025-04-05", "2025-04-15", "Alex"),
    ("Database Design", "2025-04-02", "2025-04-08", "Sarah"),
    ("Security Audit", "2025-04-12", "2025-04-20", "Sarah"),
];

/// Gantt sample schedule as CSV text.
pub fn gantt_template_csv() -> String {
    let mut out = String::new();
    out.push_str(&GANTT_HEADERS.join(","));
    out.push('\n');
    for (task, start, end, parent, progress) in GANTT_SAMPLE {
        out.push_str(&format!("{task},{start},{end},{parent},{progress}\n"));
    }
    out
}

/// Workload sample roster as CSV text.
pub fn workload_template_csv() -> String {
    let mut out = String::new();
    out.push_str(&WORKLOAD_HEADERS.join(","));
    out.push('\n');
    for (task, start, end, assignee) in WORKLOAD_SAMPLE {
        out.push_str(&format!("{task},{start},{end},{assignee}\n"));
    }
    out
}

/// Gantt sample schedule as an XLSX workbook ("Timeline" sheet).
pub fn gantt_template_xlsx() -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Timeline")?;

    for (col, header) in GANTT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, (task, start, end, parent, progress)) in GANTT_SAMPLE.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *task)?;
        sheet.write_string(row, 1, *start)?;
        sheet.write_string(row, 2, *end)?;
        sheet.write_string(row, 3, *parent)?;
        sheet.write_number(row, 4, *progress)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Workload sample roster as an XLSX workbook ("Resources" sheet).
pub fn workload_template_xlsx() -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Resources")?;

    for (col, header) in WORKLOAD_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, (task, start, end, assignee)) in WORKLOAD_SAMPLE.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *task)?;
        sheet.write_string(row, 1, *start)?;
        sheet.write_string(row, 2, *end)?;
        sheet.write_string(row, 3, *assignee)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gantt_csv_has_header_and_five_rows() {
        let csv = gantt_template_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Task,Start Date,End Date,Parent,Progress");
        assert_eq!(lines[3], "UI Design,2025-03-06,2025-03-12,Design Phase,0.8");
    }

    #[test]
    fn workload_csv_has_header_and_four_rows() {
        let csv = workload_template_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Task,Start Date,End Date,Assignee");
        assert_eq!(lines[1], "Frontend Dev,2025-04-01,2025-04-10,Alex");
    }

    #[test]
    fn xlsx_templates_produce_workbooks() {
        let gantt = gantt_template_xlsx().unwrap();
        let workload = workload_template_xlsx().unwrap();
        // XLSX files are ZIP containers; check the magic bytes
        assert_eq!(&gantt[..2], b"PK");
        assert_eq!(&workload[..2], b"PK");
    }
}

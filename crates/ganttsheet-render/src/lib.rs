//! # ganttsheet-render
//!
//! Rendering backends for ganttsheet timelines.
//!
//! This crate provides:
//! - Chart-window geometry (date to pixel mapping over padded date ranges)
//! - SVG Gantt chart rendering over flattened display rows
//! - SVG workload lane rendering with collision highlighting
//! - Sample template writers (XLSX and CSV)
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ganttsheet_core::{Forest, TaskRecord};
//! use ganttsheet_render::GanttSvgRenderer;
//!
//! let forest = Forest::build(vec![TaskRecord::new(
//!     0,
//!     "Kickoff",
//!     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
//! )]);
//! let rows = forest.flatten();
//! let svg = GanttSvgRenderer::new().render(&rows).unwrap();
//! assert!(svg.to_string().contains("Kickoff"));
//! ```

pub mod gantt;
pub mod geometry;
pub mod template;
pub mod workload;

pub use gantt::GanttSvgRenderer;
pub use geometry::ChartWindow;
pub use workload::WorkloadSvgRenderer;

use thiserror::Error;

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: the task set is empty")]
    Empty,

    #[error("excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

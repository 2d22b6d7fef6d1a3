//! # ganttsheet-core
//!
//! Domain model and timeline algorithms for ganttsheet.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `Forest`, `TaskNode`, `FlattenedRow`
//! - Hierarchy building from weak name references and pre-order flattening
//! - Interval overlap detection and per-assignee collision lanes
//! - Summary statistics over a task set
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ganttsheet_core::{ExpandedState, Forest, TaskRecord};
//!
//! let records = vec![
//!     TaskRecord::new(0, "Design", date(2025, 3, 6), date(2025, 3, 20)),
//!     TaskRecord::new(1, "UI Design", date(2025, 3, 6), date(2025, 3, 12)).parent("Design"),
//! ];
//! let forest = Forest::build(records);
//! let rows = forest.flatten();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].depth, 1);
//!
//! fn date(y: i32, m: u32, d: u32) -> NaiveDate {
//!     NaiveDate::from_ymd_opt(y, m, d).unwrap()
//! }
//! ```

pub mod forest;
pub mod overlap;
pub mod summary;

pub use forest::{filter_by_name, ExpandedState, FlattenedRow, Forest, ParentLink, TaskNode};
pub use overlap::{group_by_assignee, overlaps, Collision, Lane};
pub use summary::Summary;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases & Constants
// ============================================================================

/// Unique identifier for a task, stable within one upload
pub type TaskId = String;

/// Assignee used when the input carries none
pub const DEFAULT_ASSIGNEE: &str = "Unassigned";

/// Rotating bar color palette, keyed by row index
pub const PALETTE: [&str; 6] = [
    "#3b82f6", "#8b5cf6", "#10b981", "#f59e0b", "#ef4444", "#ec4899",
];

/// Palette color for a given row index (wraps around)
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

// ============================================================================
// TaskRecord
// ============================================================================

/// One schedule entry as produced by the row parser.
///
/// `parent` is a weak reference by *name*, not by id: it is resolved once by
/// [`Forest::build`] and not carried past that point. Duplicate names are
/// tolerated; `id` is derived from the source row index so it stays unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable identifier, unique within one upload
    pub id: TaskId,
    /// Display label
    pub name: String,
    /// Optional reference to another task's `name` (unresolved label)
    pub parent: Option<String>,
    /// First day of the task (inclusive)
    pub start: NaiveDate,
    /// Last day of the task (inclusive); `start > end` is tolerated
    pub end: NaiveDate,
    /// Completion fraction in [0, 1]
    pub progress: f32,
    /// Owner, used by the workload view
    pub assignee: String,
    /// Display color hint
    pub color: String,
}

impl TaskRecord {
    /// Create a record for the given source row index and name.
    ///
    /// The id is `task-{index}-{name}`, which keeps duplicate names apart.
    pub fn new(index: usize, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let name = name.into();
        Self {
            id: format!("task-{index}-{name}"),
            name,
            parent: None,
            start,
            end,
            progress: 0.0,
            assignee: DEFAULT_ASSIGNEE.into(),
            color: palette_color(index).into(),
        }
    }

    /// Set the parent name reference
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the completion fraction
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    /// Set the assignee
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Set the display color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Number of days the task spans, inclusive of both endpoints.
    ///
    /// A single-day task spans 1 day. Inverted ranges produce values < 1.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_builder() {
        let rec = TaskRecord::new(3, "Security Audit", date(2025, 4, 12), date(2025, 4, 20))
            .assignee("Sarah")
            .progress(0.4)
            .color("#123456");

        assert_eq!(rec.id, "task-3-Security Audit");
        assert_eq!(rec.name, "Security Audit");
        assert_eq!(rec.assignee, "Sarah");
        assert_eq!(rec.progress, 0.4);
        assert_eq!(rec.color, "#123456");
        assert!(rec.parent.is_none());
    }

    #[test]
    fn record_defaults() {
        let rec = TaskRecord::new(0, "Kickoff", date(2025, 3, 1), date(2025, 3, 5));
        assert_eq!(rec.assignee, DEFAULT_ASSIGNEE);
        assert_eq!(rec.progress, 0.0);
        assert_eq!(rec.color, PALETTE[0]);
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), "#3b82f6");
        assert_eq!(palette_color(5), "#ec4899");
        assert_eq!(palette_color(6), "#3b82f6");
        assert_eq!(palette_color(13), "#8b5cf6");
    }

    #[test]
    fn duplicate_names_get_distinct_ids() {
        let a = TaskRecord::new(0, "Review", date(2025, 1, 1), date(2025, 1, 2));
        let b = TaskRecord::new(1, "Review", date(2025, 1, 3), date(2025, 1, 4));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duration_is_inclusive() {
        let rec = TaskRecord::new(0, "One day", date(2025, 1, 1), date(2025, 1, 1));
        assert_eq!(rec.duration_days(), 1);

        let rec = TaskRecord::new(0, "Five days", date(2025, 1, 1), date(2025, 1, 5));
        assert_eq!(rec.duration_days(), 5);
    }

    #[test]
    fn inverted_range_is_tolerated() {
        let rec = TaskRecord::new(0, "Inverted", date(2025, 1, 10), date(2025, 1, 5));
        assert_eq!(rec.duration_days(), -4);
    }
}

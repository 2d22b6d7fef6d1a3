//! Upload summary statistics shown above the timeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::TaskRecord;

/// Headline numbers for one uploaded task set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of tasks
    pub tasks: usize,
    /// Mean completion as a rounded percentage (0–100)
    pub completion_pct: u32,
    /// Earliest task start
    pub start: NaiveDate,
    /// Latest task end
    pub end: NaiveDate,
}

impl Summary {
    /// Compute the summary; `None` for an empty task set.
    pub fn of(records: &[TaskRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut start = first.start;
        let mut end = first.end;
        let mut total = 0.0f64;
        for rec in records {
            start = start.min(rec.start);
            end = end.max(rec.end);
            total += f64::from(rec.progress);
        }
        let completion_pct = (total / records.len() as f64 * 100.0).round() as u32;
        Some(Self {
            tasks: records.len(),
            completion_pct,
            start,
            end,
        })
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
    fn summary_aggregates_range_and_completion() {
        let records = vec![
            TaskRecord::new(0, "Kickoff", date(2025, 3, 1), date(2025, 3, 5)).progress(1.0),
            TaskRecord::new(1, "Design", date(2025, 3, 6), date(2025, 3, 20)).progress(0.4),
            TaskRecord::new(2, "Development", date(2025, 3, 21), date(2025, 4, 15)).progress(0.1),
        ];
        let summary = Summary::of(&records).unwrap();

        assert_eq!(summary.tasks, 3);
        assert_eq!(summary.completion_pct, 50);
        assert_eq!(summary.start, date(2025, 3, 1));
        assert_eq!(summary.end, date(2025, 4, 15));
    }

    #[test]
    fn summary_of_empty_is_none() {
        assert_eq!(Summary::of(&[]), None);
    }

    #[test]
    fn summary_handles_unordered_rows() {
        let records = vec![
            TaskRecord::new(0, "Late", date(2025, 5, 1), date(2025, 5, 10)),
            TaskRecord::new(1, "Early", date(2025, 1, 1), date(2025, 1, 3)),
        ];
        let summary = Summary::of(&records).unwrap();
        assert_eq!(summary.start, date(2025, 1, 1));
        assert_eq!(summary.end, date(2025, 5, 10));
    }
}

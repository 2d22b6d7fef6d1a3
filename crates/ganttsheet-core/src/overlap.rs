//! Interval overlap detection and per-assignee collision lanes.
//!
//! Collision semantics are day-granular and inclusive on both ends: a task
//! ending on the same day another starts still counts as a same-day resource
//! conflict. Dates are already truncated to days by the time they reach this
//! module, so no further normalization happens here.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{TaskId, TaskRecord};

/// True iff the closed day-intervals `[s1, e1]` and `[s2, e2]` intersect.
///
/// Touching endpoints collide: `overlaps(Jan 1–5, Jan 5–10)` is true,
/// `overlaps(Jan 1–5, Jan 6–10)` is false.
pub fn overlaps(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && s2 <= e1
}

/// One assignee's tasks, in input order.
#[derive(Clone, Debug, Serialize)]
pub struct Lane {
    /// Assignee name
    pub name: String,
    pub tasks: Vec<TaskRecord>,
}

impl Lane {
    /// Whether the given task's date range intersects any *other* task in
    /// this lane. Cross-assignee overlaps are never flagged; callers only
    /// pass tasks belonging to this lane.
    pub fn has_collision(&self, task: &TaskRecord) -> bool {
        self.tasks.iter().any(|other| {
            other.id != task.id && overlaps(task.start, task.end, other.start, other.end)
        })
    }

    /// All colliding pairs within the lane, each pair reported once.
    ///
    /// O(k²) over the lane; fine because k (tasks per person) stays small.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut found = Vec::new();
        for (i, a) in self.tasks.iter().enumerate() {
            for b in &self.tasks[i + 1..] {
                if overlaps(a.start, a.end, b.start, b.end) {
                    found.push(Collision {
                        assignee: self.name.clone(),
                        first: a.id.clone(),
                        second: b.id.clone(),
                    });
                }
            }
        }
        found
    }
}

/// A double-booking: two tasks of one assignee with intersecting date ranges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub assignee: String,
    pub first: TaskId,
    pub second: TaskId,
}

/// Group records into per-assignee lanes, preserving first-seen order of
/// assignees and input order of tasks within each lane.
pub fn group_by_assignee(records: &[TaskRecord]) -> Vec<Lane> {
    let mut lanes: Vec<Lane> = Vec::new();
    for rec in records {
        match lanes.iter_mut().find(|lane| lane.name == rec.assignee) {
            Some(lane) => lane.tasks.push(rec.clone()),
            None => lanes.push(Lane {
                name: rec.assignee.clone(),
                tasks: vec![rec.clone()],
            }),
        }
    }
    lanes
}

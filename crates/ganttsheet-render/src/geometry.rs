//! Chart-window geometry: calendar dates to horizontal pixel offsets.
//!
//! The window is a pure function of the task set's date extent plus fixed
//! lead-in/trailing padding; the project and resource views pad differently.
//! Durations are inclusive of both endpoints, so a single-day task spans one
//! day width, and bars never shrink below a minimum pixel width.

use chrono::NaiveDate;

/// Lead-in days before the earliest start (project view)
pub const PROJECT_LEAD_DAYS: i64 = 7;
/// Trailing days after the latest end (project view)
pub const PROJECT_TRAIL_DAYS: i64 = 14;
/// Lead-in days before the earliest start (resource view)
pub const RESOURCE_LEAD_DAYS: i64 = 5;
/// Trailing days after the latest end (resource view)
pub const RESOURCE_TRAIL_DAYS: i64 = 10;

/// Default day width for the project view, in pixels
pub const PROJECT_DAY_WIDTH: f64 = 44.0;
/// Default day width for the resource view, in pixels
pub const RESOURCE_DAY_WIDTH: f64 = 40.0;
/// Bars never render narrower than this, even for inverted date ranges
pub const MIN_BAR_WIDTH: f64 = 12.0;

/// The padded date range driving the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartWindow {
    /// First rendered day
    pub start: NaiveDate,
    /// Last rendered day (inclusive)
    pub end: NaiveDate,
    /// Pixels per day
    pub day_width: f64,
}

impl ChartWindow {
    /// Window for the project (Gantt) view: 7 days lead-in, 14 trailing.
    pub fn project(min_start: NaiveDate, max_end: NaiveDate) -> Self {
        Self {
            start: min_start - chrono::Duration::days(PROJECT_LEAD_DAYS),
            end: max_end + chrono::Duration::days(PROJECT_TRAIL_DAYS),
            day_width: PROJECT_DAY_WIDTH,
        }
    }

    /// Window for the resource (workload) view: 5 days lead-in, 10 trailing.
    pub fn resource(min_start: NaiveDate, max_end: NaiveDate) -> Self {
        Self {
            start: min_start - chrono::Duration::days(RESOURCE_LEAD_DAYS),
            end: max_end + chrono::Duration::days(RESOURCE_TRAIL_DAYS),
            day_width: RESOURCE_DAY_WIDTH,
        }
    }

    /// Override the pixels-per-day scale
    pub fn day_width(mut self, day_width: f64) -> Self {
        self.day_width = day_width;
        self
    }

    /// Number of rendered days, inclusive of both ends
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Total chart width in pixels
    pub fn width(&self) -> f64 {
        self.total_days() as f64 * self.day_width
    }

    /// Horizontal offset of a date from the window start
    pub fn x(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 * self.day_width
    }

    /// Pixel width of a bar spanning `[start, end]`, clamped to the minimum.
    pub fn bar_width(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = (end - start).num_days() + 1;
        (days as f64 * self.day_width).max(MIN_BAR_WIDTH)
    }

    /// Whether a date falls inside the rendered range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate the rendered days in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.total_days()).map(move |i| start + chrono::Duration::days(i))
    }
}

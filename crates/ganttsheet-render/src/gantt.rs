//! SVG Gantt chart renderer.
//!
//! Renders flattened display rows (visibility and search filtering already
//! applied by the caller) against a project-view chart window: day columns
//! with weekend shading, a today marker, a sidebar with depth-indented task
//! labels, and per-task bars with progress overlays. Group bars render as
//! thin rails spanning their subtree's range.

use chrono::{Datelike, NaiveDate, Weekday};
use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;

use ganttsheet_core::FlattenedRow;

use crate::geometry::{ChartWindow, PROJECT_DAY_WIDTH};
use crate::RenderError;

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct GanttSvgRenderer {
    /// Pixels per day
    pub day_width: f64,
    /// Height per task row in pixels
    pub row_height: f64,
    /// Width of the label sidebar in pixels
    pub sidebar_width: f64,
    /// Header height in pixels
    pub header_height: f64,
    /// Chart background color
    pub background: String,
    /// Header strip color
    pub header_fill: String,
    /// Day grid line color
    pub grid_color: String,
    /// Weekend column shading
    pub weekend_fill: String,
    /// Today marker color
    pub today_color: String,
    /// Bar color for group rails
    pub group_bar_color: String,
    /// Primary text color
    pub text_color: String,
    /// Secondary text color
    pub muted_color: String,
    /// Font family
    pub font_family: String,
    /// Base font size in pixels
    pub font_size: f64,
    /// Date for the today marker; `None` uses the current date
    pub today: Option<NaiveDate>,
}

impl Default for GanttSvgRenderer {
    fn default() -> Self {
        Self {
            day_width: PROJECT_DAY_WIDTH,
            row_height: 64.0,
            sidebar_width: 280.0,
            header_height: 60.0,
            background: "#0f172a".into(),
            header_fill: "#1e293b".into(),
            grid_color: "rgba(255,255,255,0.05)".into(),
            weekend_fill: "rgba(0,0,0,0.1)".into(),
            today_color: "#ef4444".into(),
            group_bar_color: "#475569".into(),
            text_color: "#ffffff".into(),
            muted_color: "#94a3b8".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12.0,
            today: None,
        }
    }
}

impl GanttSvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure pixels per day
    pub fn day_width(mut self, day_width: f64) -> Self {
        self.day_width = day_width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Pin the today marker to a fixed date (useful for reproducible output)
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    fn effective_today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Render display rows into a standalone SVG document.
    pub fn render(&self, rows: &[FlattenedRow<'_>]) -> Result<Document, RenderError> {
        let (min_start, max_end) = date_extent(rows).ok_or(RenderError::Empty)?;
        let window = ChartWindow::project(min_start, max_end).day_width(self.day_width);

        let body_height = rows.len() as f64 * self.row_height;
        let total_width = self.sidebar_width + window.width();
        let total_height = self.header_height + body_height;

        let mut doc = Document::new()
            .set("width", total_width)
            .set("height", total_height)
            .set("viewBox", (0.0, 0.0, total_width, total_height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        doc = doc.add(
            Rectangle::new()
                .set("width", total_width)
                .set("height", total_height)
                .set("fill", self.background.as_str()),
        );

        doc = doc.add(self.render_calendar(&window, body_height));
        doc = doc.add(self.render_rows(&window, rows));
        doc = doc.add(self.render_sidebar(rows));

        let today = self.effective_today();
        if window.contains(today) {
            doc = doc.add(self.render_today_line(&window, today, total_height));
        }

        Ok(doc)
    }

    /// Day columns: header labels, weekend shading, vertical grid lines.
    fn render_calendar(&self, window: &ChartWindow, body_height: f64) -> Group {
        let mut group = Group::new().set("class", "calendar");

        group = group.add(
            Rectangle::new()
                .set("x", self.sidebar_width)
                .set("width", window.width())
                .set("height", self.header_height)
                .set("fill", self.header_fill.as_str()),
        );

        for day in window.days() {
            let x = self.sidebar_width + window.x(day);
            let is_weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);

            if is_weekend {
                group = group.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", self.header_height)
                        .set("width", window.day_width)
                        .set("height", body_height)
                        .set("fill", self.weekend_fill.as_str()),
                );
            }

            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", 0.0)
                    .set("x2", x)
                    .set("y2", self.header_height + body_height)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );

            let center = x + window.day_width / 2.0;
            group = group.add(
                Text::new(day.format("%a").to_string().to_uppercase())
                    .set("x", center)
                    .set("y", 24.0)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 3.0)
                    .set("fill", self.muted_color.as_str())
                    .set("text-anchor", "middle"),
            );
            group = group.add(
                Text::new(day.day().to_string())
                    .set("x", center)
                    .set("y", 44.0)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("font-weight", "bold")
                    .set("fill", self.text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    /// Task bars with progress overlays, one row per flattened entry.
    fn render_rows(&self, window: &ChartWindow, rows: &[FlattenedRow<'_>]) -> Group {
        let mut group = Group::new().set("class", "bars");

        for (i, row) in rows.iter().enumerate() {
            let row_top = self.header_height + i as f64 * self.row_height;

            group = group.add(
                Line::new()
                    .set("x1", 0.0)
                    .set("y1", row_top + self.row_height)
                    .set("x2", self.sidebar_width + window.width())
                    .set("y2", row_top + self.row_height)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );

            let x = self.sidebar_width + window.x(row.node.start);
            let width = window.bar_width(row.node.start, row.node.end);

            if row.node.is_group() {
                // Groups render as a thin rail spanning their range
                group = group.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", row_top + 26.0)
                        .set("width", width)
                        .set("height", 12.0)
                        .set("rx", 2)
                        .set("fill", self.group_bar_color.as_str()),
                );
                continue;
            }

            group = group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", row_top + 18.0)
                    .set("width", width)
                    .set("height", 28.0)
                    .set("rx", 8)
                    .set("fill", row.node.color.as_str()),
            );

            let progress = f64::from(row.node.progress).clamp(0.0, 1.0);
            if progress > 0.0 {
                group = group.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", row_top + 18.0)
                        .set("width", width * progress)
                        .set("height", 28.0)
                        .set("rx", 8)
                        .set("fill", "rgba(255,255,255,0.25)"),
                );
            }

            // Only wide bars get an inline percentage label
            if width > 120.0 {
                group = group.add(
                    Text::new(format!("{}%", (f64::from(row.node.progress) * 100.0).round()))
                        .set("x", x + width / 2.0)
                        .set("y", row_top + 36.0)
                        .set("font-family", self.font_family.as_str())
                        .set("font-size", self.font_size - 2.0)
                        .set("font-weight", "bold")
                        .set("fill", self.text_color.as_str())
                        .set("text-anchor", "middle"),
                );
            }
        }

        group
    }

    /// Label sidebar with depth indentation and leaf color dots.
    fn render_sidebar(&self, rows: &[FlattenedRow<'_>]) -> Group {
        let mut group = Group::new().set("class", "sidebar");

        let total_height = self.header_height + rows.len() as f64 * self.row_height;
        group = group.add(
            Rectangle::new()
                .set("width", self.sidebar_width)
                .set("height", total_height)
                .set("fill", self.background.as_str()),
        );
        group = group.add(
            Line::new()
                .set("x1", self.sidebar_width)
                .set("y1", 0.0)
                .set("x2", self.sidebar_width)
                .set("y2", total_height)
                .set("stroke", "rgba(59, 130, 246, 0.4)")
                .set("stroke-width", 2),
        );

        for (i, row) in rows.iter().enumerate() {
            let row_top = self.header_height + i as f64 * self.row_height;
            let indent = 24.0 + row.depth as f64 * 20.0;
            let baseline = row_top + self.row_height / 2.0 + 4.0;

            let is_group = row.node.is_group();
            if !is_group {
                group = group.add(
                    Circle::new()
                        .set("cx", indent)
                        .set("cy", baseline - 4.0)
                        .set("r", 4)
                        .set("fill", row.node.color.as_str())
                        .set("opacity", 0.6),
                );
            }

            group = group.add(
                Text::new(row.node.name.clone())
                    .set("x", indent + if is_group { 0.0 } else { 12.0 })
                    .set("y", baseline)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size + 1.0)
                    .set("font-weight", if is_group { "bold" } else { "normal" })
                    .set(
                        "fill",
                        if is_group {
                            self.text_color.as_str()
                        } else {
                            self.muted_color.as_str()
                        },
                    ),
            );
        }

        group
    }

    fn render_today_line(&self, window: &ChartWindow, today: NaiveDate, height: f64) -> Group {
        let x = self.sidebar_width + window.x(today);
        Group::new()
            .set("class", "today")
            .add(
                Line::new()
                    .set("x1", x)
                    .set("y1", 0.0)
                    .set("x2", x)
                    .set("y2", height)
                    .set("stroke", self.today_color.as_str())
                    .set("stroke-width", 2),
            )
            .add(
                Text::new("TODAY")
                    .set("x", x)
                    .set("y", self.header_height - 6.0)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 3.0)
                    .set("font-weight", "bold")
                    .set("fill", self.today_color.as_str())
                    .set("text-anchor", "middle"),
            )
    }
}

/// Min start and max end over the rows, `None` when empty.
fn date_extent(rows: &[FlattenedRow<'_>]) -> Option<(NaiveDate, NaiveDate)> {
    let first = rows.first()?;
    let mut min_start = first.node.start;
    let mut max_end = first.node.end;
    for row in rows {
        min_start = min_start.min(row.node.start);
        max_end = max_end.max(row.node.end);
    }
    Some((min_start, max_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganttsheet_core::{ExpandedState, Forest, TaskRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_forest() -> Forest {
        Forest::build(vec![
            TaskRecord::new(0, "Design", date(2025, 3, 6), date(2025, 3, 20)).progress(0.4),
            TaskRecord::new(1, "UI Design", date(2025, 3, 6), date(2025, 3, 12))
                .parent("Design")
                .progress(0.8),
            TaskRecord::new(2, "Development", date(2025, 3, 21), date(2025, 4, 15)),
        ])
    }

    #[test]
    fn render_contains_task_labels() {
        let forest = sample_forest();
        let rows = forest.flatten();
        let doc = GanttSvgRenderer::new()
            .today(date(2025, 3, 10))
            .render(&rows)
            .unwrap();

        let out = doc.to_string();
        assert!(out.contains("Design"));
        assert!(out.contains("UI Design"));
        assert!(out.contains("Development"));
    }

    #[test]
    fn today_marker_only_inside_window() {
        let forest = sample_forest();
        let rows = forest.flatten();

        let inside = GanttSvgRenderer::new()
            .today(date(2025, 3, 10))
            .render(&rows)
            .unwrap()
            .to_string();
        assert!(inside.contains("TODAY"));

        let outside = GanttSvgRenderer::new()
            .today(date(2030, 1, 1))
            .render(&rows)
            .unwrap()
            .to_string();
        assert!(!outside.contains("TODAY"));
    }

    #[test]
    fn empty_rows_are_an_error() {
        let result = GanttSvgRenderer::new().render(&[]);
        assert!(matches!(result, Err(RenderError::Empty)));
    }

    #[test]
    fn collapsed_rows_shrink_the_chart() {
        let forest = sample_forest();
        let design_id = forest.roots[0].id.clone();

        let all = forest.flatten();
        let mut expanded = ExpandedState::all_expanded();
        expanded.collapse(&design_id);
        let visible = forest.flatten_visible(&expanded);

        let renderer = GanttSvgRenderer::new().today(date(2025, 3, 10));
        let full = renderer.render(&all).unwrap().to_string();
        let collapsed = renderer.render(&visible).unwrap().to_string();

        assert!(full.contains("UI Design"));
        assert!(!collapsed.contains("UI Design"));
    }
}

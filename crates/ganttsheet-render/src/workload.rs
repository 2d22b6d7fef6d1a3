//! SVG workload (resource allocation) renderer.
//!
//! One horizontal lane per assignee, tasks stacked inside the lane, bars
//! highlighted when the lane detects a same-person double-booking. Uses the
//! resource-view chart window (tighter padding and scale than the project
//! view).

use chrono::{Datelike, NaiveDate};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

use ganttsheet_core::{Lane, TaskRecord};

use crate::geometry::{ChartWindow, RESOURCE_DAY_WIDTH};
use crate::RenderError;

/// SVG workload renderer configuration
#[derive(Clone, Debug)]
pub struct WorkloadSvgRenderer {
    /// Pixels per day
    pub day_width: f64,
    /// Width of the assignee sidebar in pixels
    pub sidebar_width: f64,
    /// Header height in pixels
    pub header_height: f64,
    /// Bar height in pixels
    pub bar_height: f64,
    /// Vertical distance between stacked bars in a lane
    pub bar_stride: f64,
    /// Minimum lane height in pixels
    pub min_lane_height: f64,
    /// Chart background color
    pub background: String,
    /// Header strip color
    pub header_fill: String,
    /// Grid line color
    pub grid_color: String,
    /// Normal bar fill/border color
    pub bar_color: String,
    /// Collision bar fill/border color
    pub collision_color: String,
    /// Primary text color
    pub text_color: String,
    /// Secondary text color
    pub muted_color: String,
    /// Font family
    pub font_family: String,
    /// Base font size in pixels
    pub font_size: f64,
}

impl Default for WorkloadSvgRenderer {
    fn default() -> Self {
        Self {
            day_width: RESOURCE_DAY_WIDTH,
            sidebar_width: 200.0,
            header_height: 40.0,
            bar_height: 24.0,
            bar_stride: 30.0,
            min_lane_height: 80.0,
            background: "#0f172a".into(),
            header_fill: "#1e293b".into(),
            grid_color: "rgba(255,255,255,0.05)".into(),
            bar_color: "#3b82f6".into(),
            collision_color: "#ef4444".into(),
            text_color: "#ffffff".into(),
            muted_color: "#94a3b8".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12.0,
        }
    }
}

impl WorkloadSvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure pixels per day
    pub fn day_width(mut self, day_width: f64) -> Self {
        self.day_width = day_width;
        self
    }

    /// Tasks stack downward inside a lane; lanes never shrink below the
    /// minimum height.
    fn lane_height(&self, lane: &Lane) -> f64 {
        (20.0 + lane.tasks.len() as f64 * self.bar_stride).max(self.min_lane_height)
    }

    /// Render assignee lanes into a standalone SVG document.
    pub fn render(&self, lanes: &[Lane]) -> Result<Document, RenderError> {
        let (min_start, max_end) = lane_extent(lanes).ok_or(RenderError::Empty)?;
        let window = ChartWindow::resource(min_start, max_end).day_width(self.day_width);

        let body_height: f64 = lanes.iter().map(|l| self.lane_height(l)).sum();
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

        doc = doc.add(self.render_header(&window, body_height));

        let mut lane_top = self.header_height;
        for lane in lanes {
            doc = doc.add(self.render_lane(&window, lane, lane_top));
            lane_top += self.lane_height(lane);
        }

        Ok(doc)
    }

    /// Day-number header strip plus vertical day grid.
    fn render_header(&self, window: &ChartWindow, body_height: f64) -> Group {
        let mut group = Group::new().set("class", "header");

        group = group.add(
            Rectangle::new()
                .set("width", self.sidebar_width + window.width())
                .set("height", self.header_height)
                .set("fill", self.header_fill.as_str()),
        );
        group = group.add(
            Text::new("RESOURCE")
                .set("x", 16.0)
                .set("y", self.header_height / 2.0 + 4.0)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 2.0)
                .set("font-weight", "bold")
                .set("fill", self.text_color.as_str()),
        );

        for day in window.days() {
            let x = self.sidebar_width + window.x(day);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", 0.0)
                    .set("x2", x)
                    .set("y2", self.header_height + body_height)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(day.day().to_string())
                    .set("x", x + window.day_width / 2.0)
                    .set("y", self.header_height / 2.0 + 4.0)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 2.0)
                    .set("fill", self.muted_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    /// One assignee's lane: sidebar label, task count, stacked bars.
    fn render_lane(&self, window: &ChartWindow, lane: &Lane, lane_top: f64) -> Group {
        let mut group = Group::new().set("class", "lane");
        let height = self.lane_height(lane);

        group = group.add(
            Line::new()
                .set("x1", 0.0)
                .set("y1", lane_top + height)
                .set("x2", self.sidebar_width + window.width())
                .set("y2", lane_top + height)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1),
        );

        group = group.add(
            Text::new(lane.name.clone())
                .set("x", 16.0)
                .set("y", lane_top + 24.0)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size + 1.0)
                .set("font-weight", "bold")
                .set("fill", self.text_color.as_str()),
        );
        group = group.add(
            Text::new(format!("{} tasks", lane.tasks.len()))
                .set("x", 16.0)
                .set("y", lane_top + 40.0)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 2.0)
                .set("fill", self.muted_color.as_str()),
        );

        for (i, task) in lane.tasks.iter().enumerate() {
            group = group.add(self.render_bar(window, lane, task, lane_top, i));
        }

        group
    }

    fn render_bar(
        &self,
        window: &ChartWindow,
        lane: &Lane,
        task: &TaskRecord,
        lane_top: f64,
        index: usize,
    ) -> Group {
        let collides = lane.has_collision(task);
        let color = if collides {
            self.collision_color.as_str()
        } else {
            self.bar_color.as_str()
        };

        let x = self.sidebar_width + window.x(task.start);
        let y = lane_top + 10.0 + index as f64 * self.bar_stride;
        let width = window.bar_width(task.start, task.end);

        let mut group = Group::new().set("class", if collides { "bar collision" } else { "bar" });
        group = group.add(
            Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", width)
                .set("height", self.bar_height)
                .set("rx", 6)
                .set("fill", color)
                .set("fill-opacity", 0.15)
                .set("stroke", color)
                .set("stroke-width", 1),
        );
        group = group.add(
            Text::new(if collides {
                format!("⚠ {}", task.name)
            } else {
                task.name.clone()
            })
            .set("x", x + 8.0)
            .set("y", y + self.bar_height / 2.0 + 4.0)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size - 2.0)
            .set("fill", if collides { color } else { self.text_color.as_str() }),
        );

        group
    }
}

/// Min start and max end across all lanes, `None` when there are no tasks.
fn lane_extent(lanes: &[Lane]) -> Option<(NaiveDate, NaiveDate)> {
    let mut extent: Option<(NaiveDate, NaiveDate)> = None;
    for task in lanes.iter().flat_map(|l| &l.tasks) {
        extent = Some(match extent {
            Some((min, max)) => (min.min(task.start), max.max(task.end)),
            None => (task.start, task.end),
        });
    }
    extent
}

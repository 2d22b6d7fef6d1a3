//! ganttsheet CLI - spreadsheet-driven Gantt and workload timelines
//!
//! Command-line interface for parsing tabular schedules and rendering them
//! as SVG project or resource timelines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ganttsheet_core::{
    filter_by_name, group_by_assignee, Collision, ExpandedState, Forest, Summary, TaskRecord,
};
use ganttsheet_parser::parse_file;
use ganttsheet_render::{template, GanttSvgRenderer, WorkloadSvgRenderer};

#[derive(Parser)]
#[command(name = "ganttsheet")]
#[command(author, version, about = "Spreadsheet-driven Gantt and workload timelines", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schedule and print its summary and double-bookings
    Check {
        /// Input file path (CSV/TSV with a header row)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Render a project timeline to SVG
    Gantt {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,

        /// Collapse a group by task id (repeatable)
        #[arg(long, value_name = "TASK_ID")]
        collapse: Vec<String>,

        /// Only render tasks whose name contains this term
        #[arg(long, value_name = "TERM")]
        find: Option<String>,

        /// Pixels per day
        #[arg(long, value_name = "PX")]
        day_width: Option<f64>,

        /// Pin the today marker to a fixed date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,
    },

    /// Render a per-assignee workload timeline to SVG
    Workload {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,

        /// Pixels per day
        #[arg(long, value_name = "PX")]
        day_width: Option<f64>,
    },

    /// Print a machine- or human-readable schedule report
    Report {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// Write a sample input template (format from the output extension)
    Template {
        /// Which view the template is for
        #[arg(value_enum)]
        view: TemplateView,

        /// Output path (.csv writes CSV, anything else XLSX)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TemplateView {
    Gantt,
    Workload,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Gantt {
            file,
            output,
            collapse,
            find,
            day_width,
            as_of,
        } => gantt(&file, &output, &collapse, find.as_deref(), day_width, as_of),
        Commands::Workload {
            file,
            output,
            day_width,
        } => workload(&file, &output, day_width),
        Commands::Report { file, format } => report(&file, format),
        Commands::Template { view, output } => write_template(view, &output),
    }
}

fn load(file: &Path) -> Result<Vec<TaskRecord>> {
    debug!(file = %file.display(), "parsing schedule");
    let records =
        parse_file(file).with_context(|| format!("failed to parse {}", file.display()))?;
    info!(tasks = records.len(), "parsed schedule");
    Ok(records)
}

fn all_collisions(records: &[TaskRecord]) -> Vec<Collision> {
    group_by_assignee(records)
        .iter()
        .flat_map(|lane| lane.collisions())
        .collect()
}

fn check(file: &Path) -> Result<()> {
    let records = load(file)?;
    let summary = Summary::of(&records).context("no tasks in input")?;

    println!("Tasks:      {}", summary.tasks);
    println!("Completion: {}%", summary.completion_pct);
    println!("Timeline:   {} - {}", summary.start, summary.end);

    let collisions = all_collisions(&records);
    if collisions.is_empty() {
        println!("No double-bookings.");
    } else {
        println!("Double-bookings ({}):", collisions.len());
        for c in &collisions {
            println!("  {}: {} <-> {}", c.assignee, c.first, c.second);
        }
    }
    Ok(())
}

fn gantt(
    file: &Path,
    output: &Path,
    collapse: &[String],
    find: Option<&str>,
    day_width: Option<f64>,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let forest = Forest::build(load(file)?);

    // A fresh upload starts all-expanded; flags collapse specific groups
    let mut expanded = ExpandedState::all_expanded();
    for id in collapse {
        expanded.collapse(id);
    }

    let rows = forest.flatten_visible(&expanded);
    let rows = match find {
        Some(term) => filter_by_name(&rows, term),
        None => rows,
    };

    let mut renderer = GanttSvgRenderer::new();
    if let Some(px) = day_width {
        renderer = renderer.day_width(px);
    }
    if let Some(date) = as_of {
        renderer = renderer.today(date);
    }

    let doc = renderer.render(&rows)?;
    std::fs::write(output, doc.to_string())
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), rows = rows.len(), "wrote gantt chart");
    Ok(())
}

fn workload(file: &Path, output: &Path, day_width: Option<f64>) -> Result<()> {
    let records = load(file)?;
    let lanes = group_by_assignee(&records);

    let mut renderer = WorkloadSvgRenderer::new();
    if let Some(px) = day_width {
        renderer = renderer.day_width(px);
    }

    let doc = renderer.render(&lanes)?;
    std::fs::write(output, doc.to_string())
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), lanes = lanes.len(), "wrote workload chart");
    Ok(())
}

/// JSON payload for `report --format json`
#[derive(Serialize)]
struct Report {
    summary: Summary,
    collisions: Vec<Collision>,
}

fn report(file: &Path, format: ReportFormat) -> Result<()> {
    let records = load(file)?;
    let summary = Summary::of(&records).context("no tasks in input")?;
    let collisions = all_collisions(&records);

    match format {
        ReportFormat::Json => {
            let report = Report {
                summary,
                collisions,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            println!(
                "{} tasks, {}% complete, {} - {}",
                summary.tasks, summary.completion_pct, summary.start, summary.end
            );
            for c in &collisions {
                println!("collision [{}]: {} <-> {}", c.assignee, c.first, c.second);
            }
        }
    }
    Ok(())
}

fn write_template(view: TemplateView, output: &Path) -> Result<()> {
    let is_csv = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    match (view, is_csv) {
        (TemplateView::Gantt, true) => {
            std::fs::write(output, template::gantt_template_csv())?;
        }
        (TemplateView::Workload, true) => {
            std::fs::write(output, template::workload_template_csv())?;
        }
        (TemplateView::Gantt, false) => {
            std::fs::write(output, template::gantt_template_xlsx()?)?;
        }
        (TemplateView::Workload, false) => {
            std::fs::write(output, template::workload_template_xlsx()?)?;
        }
    }
    println!("Wrote template: {}", output.display());
    Ok(())
}

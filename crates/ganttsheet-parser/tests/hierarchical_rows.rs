//! End-to-end: tabular text through the row parser into a resolved forest.

use chrono::NaiveDate;
use ganttsheet_core::{ExpandedState, Forest, ParentLink};
use ganttsheet_parser::parse_str;
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const SCHEDULE: &str = "\
Task,Start Date,End Date,Parent,Progress
Project Kickoff,2025-03-01,2025-03-05,,1.0
Design Phase,2025-03-06,2025-03-20,,0.4
UI Design,2025-03-06,2025-03-12,Design Phase,0.8
UX Prototyping,2025-03-13,2025-03-20,Design Phase,0.2
Development,2025-03-21,2025-04-15,,0.1
";

#[test]
fn parsed_rows_build_the_expected_forest() {
    let records = parse_str(SCHEDULE).unwrap();
    assert_eq!(records.len(), 5);

    let forest = Forest::build(records);
    assert_eq!(forest.roots.len(), 3);

    let design = &forest.roots[1];
    assert_eq!(design.name, "Design Phase");
    assert!(design.is_group());
    assert_eq!(design.children.len(), 2);
    assert_eq!(design.children[0].link, ParentLink::Child(design.id.clone()));
}

#[test]
fn flatten_order_matches_input_with_depths() {
    let forest = Forest::build(parse_str(SCHEDULE).unwrap());
    let rows = forest.flatten();

    let got: Vec<(&str, usize)> = rows
        .iter()
        .map(|r| (r.node.name.as_str(), r.depth))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Project Kickoff", 0),
            ("Design Phase", 0),
            ("UI Design", 1),
            ("UX Prototyping", 1),
            ("Development", 0),
        ]
    );
}

#[test]
fn collapsing_a_phase_hides_its_subtasks() {
    let forest = Forest::build(parse_str(SCHEDULE).unwrap());
    let design_id = forest.roots[1].id.clone();

    let mut expanded = ExpandedState::all_expanded();
    expanded.collapse(&design_id);

    let visible: Vec<&str> = forest
        .flatten_visible(&expanded)
        .iter()
        .map(|r| r.node.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Project Kickoff", "Design Phase", "Development"]);
}

#[test]
fn reupload_replaces_state_wholesale() {
    // First upload, with a collapsed group
    let first = Forest::build(parse_str(SCHEDULE).unwrap());
    let mut expanded = ExpandedState::all_expanded();
    expanded.collapse(&first.roots[1].id);
    assert_eq!(first.flatten_visible(&expanded).len(), 3);

    // Second upload: new forest, reset state, everything visible again
    let second = Forest::build(
        parse_str("Task,Start Date,End Date\nSolo,2025-05-01,2025-05-02\n").unwrap(),
    );
    expanded.reset();
    let rows = second.flatten_visible(&expanded);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].node.name, "Solo");
    assert_eq!(rows[0].node.start, date(2025, 5, 1));
}

//! The shipped sample templates must survive a trip through the row parser.

use chrono::NaiveDate;
use ganttsheet_parser::parse_str;
use ganttsheet_render::template::{
    gantt_template_csv, workload_template_csv, GANTT_SAMPLE, WORKLOAD_SAMPLE,
};
use pretty_assertions::assert_eq;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn gantt_template_roundtrips_through_the_parser() {
    let records = parse_str(&gantt_template_csv()).unwrap();
    assert_eq!(records.len(), GANTT_SAMPLE.len());

    for (rec, (task, start, end, parent, progress)) in records.iter().zip(GANTT_SAMPLE) {
        assert_eq!(rec.name, task);
        assert_eq!(rec.start, date(start));
        assert_eq!(rec.end, date(end));
        match parent {
            "" => assert_eq!(rec.parent, None),
            p => assert_eq!(rec.parent.as_deref(), Some(p)),
        }
        assert_eq!(rec.progress, progress as f32);
    }
}

#[test]
fn workload_template_roundtrips_through_the_parser() {
    let records = parse_str(&workload_template_csv()).unwrap();
    assert_eq!(records.len(), WORKLOAD_SAMPLE.len());

    for (rec, (task, start, end, assignee)) in records.iter().zip(WORKLOAD_SAMPLE) {
        assert_eq!(rec.name, task);
        assert_eq!(rec.start, date(start));
        assert_eq!(rec.end, date(end));
        assert_eq!(rec.assignee, assignee);
    }
}

#[test]
fn gantt_template_builds_the_documented_hierarchy() {
    let forest = ganttsheet_core::Forest::build(parse_str(&gantt_template_csv()).unwrap());
    assert_eq!(forest.roots.len(), 3);
    assert_eq!(forest.roots[1].name, "Design Phase");
    assert_eq!(forest.roots[1].children.len(), 2);
}

#[test]
fn workload_template_contains_the_advertised_collision() {
    // Alex's two sample tasks overlap on Apr 5–10 by design
    let records = parse_str(&workload_template_csv()).unwrap();
    let lanes = ganttsheet_core::group_by_assignee(&records);

    assert_eq!(lanes[0].name, "Alex");
    assert_eq!(lanes[0].collisions().len(), 1);
    // Sarah's tasks are disjoint
    assert_eq!(lanes[1].collisions().len(), 0);
}

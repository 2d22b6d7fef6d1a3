//! Hierarchy building and flattening.
//!
//! The row parser leaves parent references as raw name labels. [`Forest::build`]
//! resolves them once into an owned tree per root, after which every node
//! carries an explicit [`ParentLink`] and the label is gone. Flattening is a
//! deterministic pre-order walk; the collapse-aware variant takes the caller's
//! [`ExpandedState`] as a parameter instead of reading ambient state.

use std::collections::HashMap;

use serde::Serialize;

use crate::{TaskId, TaskRecord};

// ============================================================================
// ParentLink & TaskNode
// ============================================================================

/// Resolved placement of a task after parent lookup.
///
/// A task whose parent label is absent, unknown, self-referencing, or part of
/// a reference cycle is promoted to `Root`. The promotion is silent but
/// observable: tests can assert on the variant directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ParentLink {
    /// Top-level task
    Root,
    /// Child of the task with the given id
    Child(TaskId),
}

/// A task after parent resolution, owning its children.
///
/// Children keep the relative order of their appearance in the input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub name: String,
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
    pub progress: f32,
    pub assignee: String,
    pub color: String,
    /// How this node was placed during resolution
    pub link: ParentLink,
    /// Owned subtree; a node with at least one child is a group
    pub children: Vec<TaskNode>,
}

impl TaskNode {
    /// A group is distinguished by having children, not by any explicit flag
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

// ============================================================================
// ExpandedState
// ============================================================================

/// Per-task expand/collapse map, keyed by task id.
///
/// Tasks without an entry default to expanded, so a fresh (or reset) state
/// shows everything. Owned by the view layer and passed into
/// [`Forest::flatten_visible`]; replaced wholesale when a new file is loaded.
#[derive(Clone, Debug, Default)]
pub struct ExpandedState {
    overrides: HashMap<TaskId, bool>,
}

impl ExpandedState {
    /// All-expanded state (the upload-time default)
    pub fn all_expanded() -> Self {
        Self::default()
    }

    /// Whether the given task's children should be shown
    pub fn is_expanded(&self, id: &str) -> bool {
        self.overrides.get(id).copied().unwrap_or(true)
    }

    /// Flip the state for one task
    pub fn toggle(&mut self, id: &str) {
        let expanded = self.is_expanded(id);
        self.overrides.insert(id.to_string(), !expanded);
    }

    /// Collapse one task
    pub fn collapse(&mut self, id: &str) {
        self.overrides.insert(id.to_string(), false);
    }

    /// Expand one task
    pub fn expand(&mut self, id: &str) {
        self.overrides.insert(id.to_string(), true);
    }

    /// Drop all overrides, returning to all-expanded
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}

// ============================================================================
// FlattenedRow
// ============================================================================

/// One display row: a node plus its computed depth (roots are depth 0).
///
/// Produced fresh on every flatten; never stored.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FlattenedRow<'a> {
    pub node: &'a TaskNode,
    pub depth: usize,
}

/// Case-insensitive substring filter over flattened rows, matching on name.
pub fn filter_by_name<'a>(rows: &[FlattenedRow<'a>], term: &str) -> Vec<FlattenedRow<'a>> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row.node.name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

// ============================================================================
// Forest
// ============================================================================

/// The set of root tasks and their descendant trees after parent resolution.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Forest {
    pub roots: Vec<TaskNode>,
    len: usize,
}

impl Forest {
    /// Resolve parent labels and build the forest.
    ///
    /// Resolution is by name; when several tasks share a name, the last
    /// occurrence wins the lookup.
    /// Roots and children retain input order. Reference cycles are broken by
    /// promoting the first task (in input order) whose ancestor chain loops
    /// back to itself, so every record lands in the forest exactly once.
    pub fn build(records: Vec<TaskRecord>) -> Self {
        let n = records.len();

        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(n);
        for (i, rec) in records.iter().enumerate() {
            by_name.insert(rec.name.as_str(), i);
        }

        // Provisional parent index per task; self-references resolve to None.
        let mut parent: Vec<Option<usize>> = records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                rec.parent
                    .as_deref()
                    .and_then(|label| by_name.get(label).copied())
                    .filter(|&j| j != i)
            })
            .collect();

        // Break cycles: walk each ancestor chain; a chain that returns to its
        // start gets cut there. The step cap covers chains that merely feed
        // into a cycle further up; that cycle is cut when its own first
        // member is visited.
        for i in 0..n {
            let mut cur = parent[i];
            let mut steps = 0usize;
            while let Some(j) = cur {
                if j == i {
                    parent[i] = None;
                    break;
                }
                steps += 1;
                if steps > n {
                    break;
                }
                cur = parent[j];
            }
        }

        let mut child_ix: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut root_ix: Vec<usize> = Vec::new();
        for (i, p) in parent.iter().enumerate() {
            match p {
                Some(j) => child_ix[*j].push(i),
                None => root_ix.push(i),
            }
        }

        let mut slots: Vec<Option<TaskRecord>> = records.into_iter().map(Some).collect();

        fn make(
            i: usize,
            link: ParentLink,
            child_ix: &[Vec<usize>],
            slots: &mut [Option<TaskRecord>],
        ) -> TaskNode {
            // Each index occurs exactly once across root_ix/child_ix.
            let rec = slots[i].take().expect("index placed once");
            let id = rec.id.clone();
            let children = child_ix[i]
                .iter()
                .map(|&c| make(c, ParentLink::Child(id.clone()), child_ix, slots))
                .collect();
            TaskNode {
                id: rec.id,
                name: rec.name,
                start: rec.start,
                end: rec.end,
                progress: rec.progress,
                assignee: rec.assignee,
                color: rec.color,
                link,
                children,
            }
        }

        let roots = root_ix
            .iter()
            .map(|&i| make(i, ParentLink::Root, &child_ix, &mut slots))
            .collect();

        Self { roots, len: n }
    }

    /// Total number of tasks in the forest
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find a node by id (searches recursively)
    pub fn get(&self, id: &str) -> Option<&TaskNode> {
        fn find<'a>(nodes: &'a [TaskNode], id: &str) -> Option<&'a TaskNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = find(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.roots, id)
    }

    /// Pre-order flatten of the whole forest, depth-annotated.
    ///
    /// Emits every task exactly once regardless of shape; output length
    /// always equals the input record count.
    pub fn flatten(&self) -> Vec<FlattenedRow<'_>> {
        let mut rows = Vec::with_capacity(self.len);
        fn walk<'a>(nodes: &'a [TaskNode], depth: usize, rows: &mut Vec<FlattenedRow<'a>>) {
            for node in nodes {
                rows.push(FlattenedRow { node, depth });
                walk(&node.children, depth + 1, rows);
            }
        }
        walk(&self.roots, 0, &mut rows);
        rows
    }

    /// Pre-order flatten that hides the subtrees of collapsed groups.
    ///
    /// A node's children are emitted immediately after it only while the node
    /// is expanded; collapsed groups still appear themselves.
    pub fn flatten_visible(&self, expanded: &ExpandedState) -> Vec<FlattenedRow<'_>> {
        let mut rows = Vec::new();
        fn walk<'a>(
            nodes: &'a [TaskNode],
            depth: usize,
            expanded: &ExpandedState,
            rows: &mut Vec<FlattenedRow<'a>>,
        ) {
            for node in nodes {
                rows.push(FlattenedRow { node, depth });
                if expanded.is_expanded(&node.id) {
                    walk(&node.children, depth + 1, expanded, rows);
                }
            }
        }
        walk(&self.roots, 0, expanded, &mut rows);
        rows
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(index: usize, name: &str) -> TaskRecord {
        TaskRecord::new(index, name, date(2025, 3, 1), date(2025, 3, 5))
    }

    fn sample_forest() -> Forest {
        // Kickoff
        // Design
        // ├── UI Design
        // └── UX Prototyping
        // Development
        Forest::build(vec![
            rec(0, "Kickoff"),
            rec(1, "Design"),
            rec(2, "UI Design").parent("Design"),
            rec(3, "UX Prototyping").parent("Design"),
            rec(4, "Development"),
        ])
    }

    #[test]
    fn build_links_children_to_parents() {
        let forest = sample_forest();
        assert_eq!(forest.roots.len(), 3);
        assert_eq!(forest.len(), 5);

        let design = &forest.roots[1];
        assert_eq!(design.name, "Design");
        assert!(design.is_group());
        assert_eq!(design.children.len(), 2);
        assert_eq!(design.children[0].name, "UI Design");
        assert_eq!(design.children[1].name, "UX Prototyping");
        assert_eq!(
            design.children[0].link,
            ParentLink::Child(design.id.clone())
        );
    }

    #[test]
    fn unresolved_parent_promotes_to_root() {
        let forest = Forest::build(vec![rec(0, "Orphan").parent("Missing")]);
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].link, ParentLink::Root);
    }

    #[test]
    fn self_parent_promotes_to_root() {
        let forest = Forest::build(vec![rec(0, "Loop").parent("Loop")]);
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].link, ParentLink::Root);
    }

    #[test]
    fn reference_cycle_is_broken() {
        // A → B → A plus an outside task hanging off A
        let forest = Forest::build(vec![
            rec(0, "A").parent("B"),
            rec(1, "B").parent("A"),
            rec(2, "C").parent("A"),
        ]);

        // All three tasks must land in the forest exactly once
        assert_eq!(forest.flatten().len(), 3);
        // A was first in input order, so it takes the root slot
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].name, "A");
        assert_eq!(forest.roots[0].link, ParentLink::Root);
    }

    #[test]
    fn duplicate_parent_name_resolves_to_last_occurrence() {
        let forest = Forest::build(vec![
            rec(0, "Phase"),
            rec(1, "Phase"),
            rec(2, "Subtask").parent("Phase"),
        ]);

        let first = &forest.roots[0];
        let second = &forest.roots[1];
        assert!(first.children.is_empty());
        assert_eq!(second.children.len(), 1);
        assert_eq!(second.children[0].name, "Subtask");
    }

    #[test]
    fn flatten_is_lossless_and_depth_annotated() {
        let forest = sample_forest();
        let rows = forest.flatten();

        assert_eq!(rows.len(), 5);
        let names: Vec<&str> = rows.iter().map(|r| r.node.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Kickoff", "Design", "UI Design", "UX Prototyping", "Development"]
        );
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 0, 1, 1, 0]);
    }

    #[test]
    fn flatten_handles_deep_chains() {
        let forest = Forest::build(vec![
            rec(0, "L0"),
            rec(1, "L1").parent("L0"),
            rec(2, "L2").parent("L1"),
            rec(3, "L3").parent("L2"),
        ]);
        let rows = forest.flatten();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].depth, 3);
    }

    #[test]
    fn flatten_visible_hides_collapsed_subtrees() {
        let forest = sample_forest();
        let design_id = forest.roots[1].id.clone();

        let mut expanded = ExpandedState::all_expanded();
        assert_eq!(forest.flatten_visible(&expanded).len(), 5);

        expanded.collapse(&design_id);
        let rows = forest.flatten_visible(&expanded);
        let names: Vec<&str> = rows.iter().map(|r| r.node.name.as_str()).collect();
        // The collapsed group itself still shows
        assert_eq!(names, vec!["Kickoff", "Design", "Development"]);

        expanded.toggle(&design_id);
        assert_eq!(forest.flatten_visible(&expanded).len(), 5);
    }

    #[test]
    fn expanded_state_defaults_and_reset() {
        let mut expanded = ExpandedState::all_expanded();
        assert!(expanded.is_expanded("task-0-anything"));

        expanded.collapse("task-0-anything");
        assert!(!expanded.is_expanded("task-0-anything"));

        expanded.reset();
        assert!(expanded.is_expanded("task-0-anything"));
    }

    #[test]
    fn get_finds_nested_nodes() {
        let forest = sample_forest();
        let ui = forest.get("task-2-UI Design");
        assert!(ui.is_some());
        assert_eq!(ui.unwrap().name, "UI Design");
        assert!(forest.get("task-9-Nope").is_none());
    }

    #[test]
    fn filter_by_name_is_case_insensitive() {
        let forest = sample_forest();
        let rows = forest.flatten();
        let hits = filter_by_name(&rows, "design");
        let names: Vec<&str> = hits.iter().map(|r| r.node.name.as_str()).collect();
        assert_eq!(names, vec!["Design", "UI Design"]);

        assert!(filter_by_name(&rows, "zzz").is_empty());
        // Empty term matches everything, preserving timeline context
        assert_eq!(filter_by_name(&rows, "").len(), 5);
    }
}

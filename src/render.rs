// --- Read-only views of controller state ---

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::{
    controller::TaskListController,
    intent::ListFilter,
    model::{Stats, Task, TaskId},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct TaskRow<'a> {
    position: usize,
    id: TaskId,
    text: &'a str,
    completed: bool,
    editing: bool,
    created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct EditView<'a> {
    id: TaskId,
    draft: &'a str,
}

#[derive(Debug, Serialize)]
struct ListView<'a> {
    tasks: Vec<TaskRow<'a>>,
    editing: Option<EditView<'a>>,
    stats: Stats,
}

fn rfc3339(ts: time::OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

fn row<'a>(position: usize, task: &'a Task, controller: &TaskListController) -> TaskRow<'a> {
    TaskRow {
        position,
        id: task.id(),
        text: task.text().as_str(),
        completed: task.is_completed(),
        editing: controller.is_editing(task.id()),
        created_at: rfc3339(task.created_at()),
        completed_at: task.completed_at().map(rfc3339),
    }
}

/// Render the (filtered) list with the edit line and stats footer.
/// Positions are 1-based and always refer to the unfiltered list.
pub fn list(controller: &TaskListController, filter: ListFilter, format: Format) -> Result<String> {
    let rows: Vec<TaskRow<'_>> = controller
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.admits(t.is_completed()))
        .map(|(i, t)| row(i + 1, t, controller))
        .collect();

    match format {
        Format::Json => {
            let editing = controller
                .edit_state()
                .editing_id()
                .zip(controller.draft())
                .map(|(id, draft)| EditView { id, draft });
            let view = ListView {
                tasks: rows,
                editing,
                stats: controller.stats(),
            };
            Ok(serde_json::to_string(&view)?)
        }
        Format::Text => Ok(list_text(controller, &rows)),
    }
}

fn list_text(controller: &TaskListController, rows: &[TaskRow<'_>]) -> String {
    let mut out = String::new();

    if controller.is_empty() {
        out.push_str("No tasks yet. Add one above to get started!");
        return out;
    }

    if rows.is_empty() {
        out.push_str("No matching tasks.\n");
    }

    for r in rows {
        let mark = if r.completed { 'x' } else { ' ' };
        if r.editing {
            let draft = controller.draft().unwrap_or_default();
            let _ = writeln!(out, "{:>3}. [{mark}] > {draft}_   (save / cancel)", r.position);
        } else {
            let _ = writeln!(out, "{:>3}. [{mark}] {}", r.position, r.text);
        }
    }

    out.push_str(&stats_text(controller.stats()));
    out
}

fn stats_text(stats: Stats) -> String {
    format!(
        "Total tasks: {} | Completed: {} | Remaining: {}",
        stats.total, stats.completed, stats.remaining
    )
}

pub fn stats(controller: &TaskListController, format: Format) -> Result<String> {
    let stats = controller.stats();
    match format {
        Format::Json => Ok(serde_json::to_string(&stats)?),
        Format::Text => Ok(stats_text(stats)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_placeholder_and_no_stats() {
        let controller = TaskListController::new();
        let out = list(&controller, ListFilter::All, Format::Text).unwrap();
        assert!(out.starts_with("No tasks yet"));
        assert!(!out.contains("Total tasks"));
    }

    #[test]
    fn text_marks_completed_and_editing() {
        let mut controller = TaskListController::new();
        let first = controller.add("first").unwrap();
        let second = controller.add("second").unwrap();
        controller.toggle_complete(first);
        controller.start_edit(second);
        controller.update_draft("sec");

        let out = list(&controller, ListFilter::All, Format::Text).unwrap();
        assert!(out.contains("  1. [x] first"));
        assert!(out.contains("  2. [ ] > sec_"));
        assert!(out.ends_with("Total tasks: 2 | Completed: 1 | Remaining: 1"));
    }

    #[test]
    fn filter_keeps_original_positions() {
        let mut controller = TaskListController::new();
        let first = controller.add("first").unwrap();
        controller.add("second");
        controller.toggle_complete(first);

        let out = list(&controller, ListFilter::Active, Format::Text).unwrap();
        assert!(out.contains("  2. [ ] second"));
        assert!(!out.contains("first"));
    }

    #[test]
    fn json_view_has_stats_and_edit() {
        let mut controller = TaskListController::new();
        let id = controller.add("only").unwrap();
        controller.start_edit(id);

        let out = list(&controller, ListFilter::All, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"]["total"], 1);
        assert_eq!(value["stats"]["remaining"], 1);
        assert_eq!(value["tasks"][0]["text"], "only");
        assert_eq!(value["tasks"][0]["editing"], true);
        assert_eq!(value["editing"]["draft"], "only");
        assert_eq!(value["editing"]["id"], id.to_string());
    }
}

//! Display projection: the ordered, tagged row list a display surface
//! renders, plus the mapping from display rows back to store tasks.
//!
//! Everything here is pure: filtering and sorting never touch what is
//! stored, only what is shown.

use crate::model::task::{Priority, Status, Task, TaskId, TaskKey};

/// Alternating row parity, a presentation tag for striped backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

/// One display row: the task's display fields plus the tags a renderer
/// styles by (priority, status, favorite, parity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TaskId,
    pub favorite: bool,
    pub text: String,
    pub priority: Priority,
    pub date: String,
    pub status: Status,
    pub parity: Parity,
}

impl Row {
    fn from_task(task: &Task, index: usize) -> Row {
        Row {
            id: task.id,
            favorite: task.favorite,
            text: task.text.clone(),
            priority: task.priority,
            date: task.date.clone(),
            status: task.status,
            parity: if index % 2 == 0 {
                Parity::Even
            } else {
                Parity::Odd
            },
        }
    }

    /// Star glyph for the favorite column
    pub fn star(&self) -> char {
        if self.favorite { '★' } else { '☆' }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey {
            text: self.text.clone(),
            date: self.date.clone(),
        }
    }
}

/// Three-key sort: favorite first, then priority by urgency, then text.
/// Stable, so equal keys keep insertion order.
fn sort_key(task: &Task) -> (bool, u8, &str) {
    (!task.favorite, task.priority.rank(), task.text.as_str())
}

/// The tasks currently shown, filtered and sorted, as references in
/// display order.
pub fn visible_tasks(tasks: &[Task], favorites_only: bool) -> Vec<&Task> {
    let mut shown: Vec<&Task> = tasks
        .iter()
        .filter(|t| !favorites_only || t.favorite)
        .collect();
    shown.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    shown
}

/// Build the display rows for the current filter setting
pub fn visible_rows(tasks: &[Task], favorites_only: bool) -> Vec<Row> {
    visible_tasks(tasks, favorites_only)
        .into_iter()
        .enumerate()
        .map(|(i, task)| Row::from_task(task, i))
        .collect()
}

/// Index-based resolution: display position N → task id, by walking the
/// same filter+sort computation. Used by edit/delete/toggle-complete,
/// which act on "the row at position N".
pub fn resolve_index(tasks: &[Task], favorites_only: bool, index: usize) -> Option<TaskId> {
    visible_tasks(tasks, favorites_only).get(index).map(|t| t.id)
}

/// Key-based resolution: row field values → task id, first match in
/// insertion order. Used by interactions that carry field values rather
/// than positions (the favorite-star click). No match is not an error.
pub fn resolve_key(tasks: &[Task], key: &TaskKey) -> Option<TaskId> {
    tasks.iter().find(|t| t.matches_key(key)).map(|t| t.id)
}

/// Selection preservation: where did the selected task land after a
/// re-sort? `None` when it is no longer displayed (filtered out), in which
/// case the selection is simply not restored.
pub fn position_of(rows: &[Row], id: TaskId) -> Option<usize> {
    rows.iter().position(|r| r.id == id)
}

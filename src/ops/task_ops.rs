//! Controller operations: validate, mutate the store, persist.
//!
//! Error display strings are the user-facing messages the adapters show
//! verbatim (status-row warning in the TUI, error line in the CLI).

use crate::io::store::{StoreError, TaskStore};
use crate::model::task::{Priority, TaskId, TaskKey};
use crate::view;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task cannot be empty")]
    EmptyText,
    #[error("select a task")]
    NoSelection,
    #[error("task not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Add a new pending task. Rejects text that trims to empty.
pub fn add_task(store: &mut TaskStore, text: &str, priority: Priority) -> Result<TaskId, TaskError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    Ok(store.add(text.to_string(), priority)?)
}

/// Overwrite text and priority of the task at display position `index`
pub fn edit_at(
    store: &mut TaskStore,
    favorites_only: bool,
    index: usize,
    text: String,
    priority: Priority,
) -> Result<(), TaskError> {
    let id = resolve(store, favorites_only, index)?;
    Ok(store.edit(id, text, priority)?)
}

/// Flip Pending ⇄ Completed on the task at display position `index`
pub fn toggle_completion_at(
    store: &mut TaskStore,
    favorites_only: bool,
    index: usize,
) -> Result<TaskId, TaskError> {
    let id = resolve(store, favorites_only, index)?;
    store.toggle_completion(id)?;
    Ok(id)
}

/// Remove the task at display position `index`. Confirmation is the
/// caller's responsibility.
pub fn delete_at(
    store: &mut TaskStore,
    favorites_only: bool,
    index: usize,
) -> Result<(), TaskError> {
    let id = resolve(store, favorites_only, index)?;
    Ok(store.remove(id)?)
}

/// Flip the favorite flag on the task with the given id (selection-
/// preserving refresh is the caller's job; capture the id first).
pub fn toggle_favorite(store: &mut TaskStore, id: TaskId) -> Result<(), TaskError> {
    Ok(store.toggle_favorite(id)?)
}

/// Flip the favorite flag on the task matching a display key. Used by the
/// star-click path, where the surface hands back row field values. An
/// unmatched key reports `NotFound`; interactive callers ignore it.
pub fn toggle_favorite_by_key(store: &mut TaskStore, key: &TaskKey) -> Result<TaskId, TaskError> {
    let id = view::resolve_key(store.tasks(), key).ok_or(TaskError::NotFound)?;
    store.toggle_favorite(id)?;
    Ok(id)
}

fn resolve(store: &TaskStore, favorites_only: bool, index: usize) -> Result<TaskId, TaskError> {
    view::resolve_index(store.tasks(), favorites_only, index).ok_or(TaskError::NoSelection)
}

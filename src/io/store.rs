use std::fs;
use std::path::{Path, PathBuf};

use crate::model::task::{Priority, Task, TaskId, TaskKey};

/// Error type for task store persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no task at that position")]
    NotFound,
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// The authoritative in-memory task list, backed by a single JSON file.
///
/// Tasks keep insertion order. Every mutator persists the full list before
/// returning; on a failed save the in-memory change is kept and the error is
/// surfaced so the caller can warn without losing state. The write is a
/// plain whole-file overwrite, not atomic, so a crash mid-write can corrupt
/// the file. Accepted for a single-user desktop tool.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Load the store from `path`. A missing file or content that fails to
    /// parse as a JSON task array is the documented "no tasks yet" state and
    /// yields an empty store, never an error.
    pub fn load(path: impl Into<PathBuf>) -> TaskStore {
        let path = path.into();
        let tasks = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<Vec<Task>>(&content).ok())
            .unwrap_or_default();

        let mut store = TaskStore {
            path,
            tasks,
            next_id: 1,
        };
        for task in &mut store.tasks {
            task.id = TaskId(store.next_id);
            store.next_id += 1;
        }
        store
    }

    /// Create an empty store that will persist to `path` (tests, `--file`
    /// pointing at a fresh location).
    pub fn empty(path: impl Into<PathBuf>) -> TaskStore {
        TaskStore {
            path: path.into(),
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a compound display key to a task, first match in insertion
    /// order. `None` when nothing matches.
    pub fn find_by_key(&self, key: &TaskKey) -> Option<&Task> {
        self.tasks.iter().find(|t| t.matches_key(key))
    }

    /// Serialize the full list and overwrite the task file.
    pub fn save(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.tasks)?;
        fs::write(&self.path, content).map_err(|source| StoreError::WriteError {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a new pending task stamped with the current time and persist.
    /// Text validation (non-empty) is the caller's responsibility.
    pub fn add(&mut self, text: String, priority: Priority) -> Result<TaskId, StoreError> {
        let mut task = Task::new(text, priority);
        let id = TaskId(self.next_id);
        self.next_id += 1;
        task.id = id;
        self.tasks.push(task);
        self.save()?;
        Ok(id)
    }

    /// Overwrite a task's text and priority in place and persist.
    pub fn edit(
        &mut self,
        id: TaskId,
        text: String,
        priority: Priority,
    ) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.text = text;
        task.priority = priority;
        self.save()
    }

    pub fn toggle_favorite(&mut self, id: TaskId) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.favorite = !task.favorite;
        self.save()
    }

    pub fn toggle_completion(&mut self, id: TaskId) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.status = task.status.toggled();
        self.save()
    }

    /// Remove exactly one task and persist.
    pub fn remove(&mut self, id: TaskId) -> Result<(), StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        self.tasks.remove(index);
        self.save()
    }

    fn find_mut(&mut self, id: TaskId) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Status;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::load(dir.path().join("tasks.json"))
    }

    #[test]
    fn load_missing_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn load_corrupt_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json {{{").unwrap();
        assert!(TaskStore::load(&path).is_empty());

        // valid JSON, wrong shape
        fs::write(&path, r#"{"tasks": []}"#).unwrap();
        assert!(TaskStore::load(&path).is_empty());
    }

    #[test]
    fn add_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = TaskStore::load(&path);
        store.add("Buy milk".into(), Priority::High).unwrap();

        let loaded = TaskStore::load(&path);
        assert_eq!(loaded.len(), 1);
        let task = &loaded.tasks()[0];
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::Pending);
        assert!(!task.favorite);
        assert!(
            chrono::NaiveDateTime::parse_from_str(&task.date, "%Y-%m-%d %H:%M").is_ok(),
            "timestamp not at minute precision: {}",
            task.date
        );
    }

    #[test]
    fn ids_are_unique_and_survive_mutation() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let a = store.add("A".into(), Priority::Medium).unwrap();
        let b = store.add("B".into(), Priority::Medium).unwrap();
        assert_ne!(a, b);

        store.edit(a, "A edited".into(), Priority::Low).unwrap();
        assert_eq!(store.get(a).unwrap().text, "A edited");
        assert_eq!(store.get(b).unwrap().text, "B");
    }

    #[test]
    fn edit_preserves_creation_date() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.add("Original".into(), Priority::Medium).unwrap();
        let date = store.get(id).unwrap().date.clone();
        store.edit(id, "Changed".into(), Priority::High).unwrap();
        assert_eq!(store.get(id).unwrap().date, date);
    }

    #[test]
    fn toggles_flip_and_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::load(&path);
        let id = store.add("Task".into(), Priority::Medium).unwrap();

        store.toggle_favorite(id).unwrap();
        store.toggle_completion(id).unwrap();

        let loaded = TaskStore::load(&path);
        assert!(loaded.tasks()[0].favorite);
        assert_eq!(loaded.tasks()[0].status, Status::Completed);

        store.toggle_completion(id).unwrap();
        assert_eq!(store.get(id).unwrap().status, Status::Pending);
    }

    #[test]
    fn remove_deletes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let a = store.add("A".into(), Priority::Medium).unwrap();
        let b = store.add("B".into(), Priority::Medium).unwrap();

        store.remove(a).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(a).is_none());
        assert!(store.get(b).is_some());

        assert!(matches!(store.remove(a), Err(StoreError::NotFound)));
    }

    #[test]
    fn legacy_bool_status_migrates_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"favorite":false,"text":"Old","priority":"Low","date":"2024-01-01 08:00","status":true}]"#,
        )
        .unwrap();

        let store = TaskStore::load(&path);
        assert_eq!(store.tasks()[0].status, Status::Completed);

        // a save writes the strict string form
        store.save().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Completed\""));
        assert!(!content.contains("true"));
    }

    #[test]
    fn unknown_priority_loads_as_medium() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"favorite":false,"text":"Odd","priority":"Urgent","date":"2024-01-01 08:00","status":"Pending"}]"#,
        )
        .unwrap();
        assert_eq!(TaskStore::load(&path).tasks()[0].priority, Priority::Medium);
    }

    #[test]
    fn find_by_key_matches_text_and_date() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.add("Buy milk".into(), Priority::Medium).unwrap();
        let key = store.get(id).unwrap().key();

        assert_eq!(store.find_by_key(&key).unwrap().id, id);

        let miss = TaskKey {
            text: "Buy milk".into(),
            date: "1999-01-01 00:00".into(),
        };
        assert!(store.find_by_key(&miss).is_none());
    }

    #[test]
    fn failed_save_keeps_memory_intact() {
        let dir = TempDir::new().unwrap();
        // point the store at a path whose parent does not exist
        let mut store = TaskStore::empty(dir.path().join("missing/tasks.json"));
        let result = store.add("Survives".into(), Priority::Medium);
        assert!(matches!(result, Err(StoreError::WriteError { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "Survives");
    }
}

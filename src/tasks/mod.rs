//! Task domain model.
//!
//! This module defines the [`Task`] record, the visibility [`Filter`] and the
//! ordered [`TaskList`] with every list transformation the application
//! performs. Nothing here touches storage or the terminal; the controller in
//! `state` drives these operations and persists the result.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single to-do item.
///
/// Records are serialized as they appear in the storage key and in export
/// files, so the field names follow the on-disk layout (`createdAt`). Every
/// field carries a serde default so a persisted record missing a field still
/// loads instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(rename = "createdAt", default = "now_timestamp")]
    pub created_at: String,
}

impl Task {
    /// Construct a new incomplete task with a fresh id and the current
    /// timestamp. The caller is responsible for trimming the title.
    ///
    pub fn new(title: &str) -> Task {
        Task {
            id: fresh_id(),
            title: title.to_string(),
            done: false,
            created_at: now_timestamp(),
        }
    }
}

/// Return the current time as an ISO-8601 string with millisecond precision.
///
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Derive a fresh task id from the current timestamp.
///
fn fresh_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Specifying the different task visibility filters.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Default for Filter {
    fn default() -> Filter {
        Filter::All
    }
}

impl Filter {
    /// Whether the given task is visible under this filter.
    ///
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done,
            Filter::Completed => task.done,
        }
    }

    /// Display label for the filter selection controls.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}

/// The ordered task collection, newest first.
///
/// Insertion order is meaningful: new tasks are prepended. Duplicate ids are
/// not validated; operations that look up by id touch the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> TaskList {
        TaskList { tasks }
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

    /// Count of completed tasks over the whole list.
    ///
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Prepend a new task built from the trimmed title. Returns false without
    /// mutating when the title trims down to nothing.
    ///
    pub fn add(&mut self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.tasks.insert(0, Task::new(title));
        true
    }

    /// Invert the completion flag of the matching task. A missing id leaves
    /// the list untouched.
    ///
    pub fn toggle_done(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.done = !task.done;
        }
    }

    /// Drop the matching task, if any.
    ///
    pub fn remove(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
    }

    /// Replace the matching task's title, or remove the task entirely when
    /// the new title trims down to nothing.
    ///
    pub fn edit_title(&mut self, id: &str, new_title: &str) {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            self.remove(id);
        } else if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = new_title.to_string();
        }
    }

    /// Drop every completed task.
    ///
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.done);
    }

    /// Replace the whole list with normalized copies of the raw records.
    ///
    /// Each record is coerced field by field: the id is defaulted from the
    /// import index when absent, the title is stringified, the completion
    /// flag follows JSON truthiness, and the creation timestamp is defaulted
    /// to now. The caller has already verified the top-level array shape.
    ///
    pub fn replace_with(&mut self, raw: &[Value]) {
        let now = now_timestamp();
        let stamp = Utc::now().timestamp_millis();
        self.tasks = raw
            .iter()
            .enumerate()
            .map(|(index, record)| normalize_record(record, index, stamp, &now))
            .collect();
    }
}

/// Coerce one imported record into a well-formed task.
///
fn normalize_record(raw: &Value, index: usize, stamp: i64, now: &str) -> Task {
    let id = match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => format!("imp-{}-{}", stamp, index),
        Some(other) => other.to_string(),
    };
    let title = match raw.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let done = raw.get("done").map(truthy).unwrap_or(false);
    let created_at = match raw.get("createdAt") {
        Some(Value::String(s)) => s.clone(),
        _ => now.to_string(),
    };
    Task {
        id,
        title,
        done,
        created_at,
    }
}

/// JSON truthiness, matching boolean coercion in the import format: null,
/// false, zero and the empty string are false, everything else is true.
///
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_prepends_new_task() {
        let mut list = TaskList::default();
        assert!(list.add("first"));
        assert!(list.add("second"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].title, "second");
        assert_eq!(list.tasks()[1].title, "first");
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_add_trims_title() {
        let mut list = TaskList::default();
        assert!(list.add("  buy milk  "));
        assert_eq!(list.tasks()[0].title, "buy milk");
    }

    #[test]
    fn test_add_empty_title_is_noop() {
        let mut list = TaskList::default();
        assert!(!list.add(""));
        assert!(!list.add("   \t "));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_task() {
        let mut list = TaskList::default();
        list.add("task");
        let before = list.tasks()[0].clone();
        let id = before.id.clone();

        list.toggle_done(&id);
        assert!(list.tasks()[0].done);
        list.toggle_done(&id);
        assert_eq!(list.tasks()[0], before);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut list = TaskList::default();
        list.add("task");
        let before = list.clone();
        list.toggle_done("no-such-id");
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_drops_only_matching_task() {
        let mut list = TaskList::new(vec![
            Task {
                id: "1".to_string(),
                title: "one".to_string(),
                done: false,
                created_at: now_timestamp(),
            },
            Task {
                id: "2".to_string(),
                title: "two".to_string(),
                done: true,
                created_at: now_timestamp(),
            },
        ]);
        list.remove("1");
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, "2");
    }

    #[test]
    fn test_edit_title_replaces_title() {
        let mut list = TaskList::default();
        list.add("old");
        let id = list.tasks()[0].id.clone();
        list.edit_title(&id, "  new title ");
        assert_eq!(list.tasks()[0].title, "new title");
    }

    #[test]
    fn test_edit_title_to_empty_removes_task() {
        let mut list = TaskList::default();
        list.add("doomed");
        let id = list.tasks()[0].id.clone();
        list.edit_title(&id, "   ");
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear_completed_keeps_active_tasks() {
        let mut list = TaskList::default();
        list.add("one");
        list.add("two");
        list.add("three");
        let id = list.tasks()[1].id.clone();
        list.toggle_done(&id);
        list.clear_completed();
        assert_eq!(list.len(), 2);
        assert!(list.tasks().iter().all(|t| !t.done));
    }

    #[test]
    fn test_filter_matches() {
        let task = Task::new("task");
        assert!(Filter::All.matches(&task));
        assert!(Filter::Active.matches(&task));
        assert!(!Filter::Completed.matches(&task));

        let done = Task {
            done: true,
            ..Task::new("done")
        };
        assert!(Filter::All.matches(&done));
        assert!(!Filter::Active.matches(&done));
        assert!(Filter::Completed.matches(&done));
    }

    #[test]
    fn test_replace_with_preserves_well_formed_records() {
        let mut list = TaskList::default();
        let raw = vec![json!({
            "id": "42",
            "title": "imported",
            "done": true,
            "createdAt": "2024-01-01T00:00:00.000Z"
        })];
        list.replace_with(&raw);
        assert_eq!(list.len(), 1);
        let task = &list.tasks()[0];
        assert_eq!(task.id, "42");
        assert_eq!(task.title, "imported");
        assert!(task.done);
        assert_eq!(task.created_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_replace_with_normalizes_missing_fields() {
        let mut list = TaskList::default();
        list.add("existing");
        let raw = vec![json!({}), json!({"title": 7, "done": "yes"})];
        list.replace_with(&raw);

        assert_eq!(list.len(), 2);
        assert!(list.tasks()[0].id.starts_with("imp-"));
        assert!(list.tasks()[0].id.ends_with("-0"));
        assert_eq!(list.tasks()[0].title, "");
        assert!(!list.tasks()[0].done);
        assert!(!list.tasks()[0].created_at.is_empty());

        assert!(list.tasks()[1].id.ends_with("-1"));
        assert_eq!(list.tasks()[1].title, "7");
        assert!(list.tasks()[1].done);
    }

    #[test]
    fn test_truthy_coercion() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({"a": 1})));
    }

    #[test]
    fn test_task_deserializes_with_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"title": "bare"}"#).unwrap();
        assert_eq!(task.title, "bare");
        assert_eq!(task.id, "");
        assert!(!task.done);
        assert!(!task.created_at.is_empty());
    }

    #[test]
    fn test_task_serializes_created_at_as_camel_case() {
        let task = Task::new("task");
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}

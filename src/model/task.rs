use serde::{Deserialize, Serialize};

use super::ids::TaskId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Kept exactly as the backend sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            description: description.into(),
            completed: false,
            deadline: None,
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Full replacement body for `PUT /tasks/{id}` carrying the current values.
    pub fn changes(&self) -> TaskChanges {
        TaskChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            deadline: self.deadline.clone(),
        }
    }

    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let lower = needle.to_lowercase();
        self.title.to_lowercase().contains(&lower)
            || self.description.to_lowercase().contains(&lower)
    }
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Client-side status filter over the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_without_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id":1,"title":"Write report"}"#).unwrap();
        assert_eq!(task.id, TaskId::new(1));
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.deadline.is_none());
    }

    #[test]
    fn changes_carry_every_writable_field() {
        let task = Task::new(3, "a", "b").with_completed(true).with_deadline("2025-01-31");
        let changes = task.changes();
        assert_eq!(changes.title, "a");
        assert_eq!(changes.description, "b");
        assert!(changes.completed);
        assert_eq!(changes.deadline.as_deref(), Some("2025-01-31"));
    }

    #[test]
    fn new_task_omits_missing_deadline() {
        let body = NewTask {
            title: "t".into(),
            description: "d".into(),
            deadline: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"title":"t","description":"d"}"#);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let task = Task::new(1, "Buy Milk", "from the corner STORE");
        assert!(task.matches_search("milk"));
        assert!(task.matches_search("store"));
        assert!(!task.matches_search("bread"));
        assert!(task.matches_search(""));
    }

    #[test]
    fn status_filter_cycles() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Pending);
        assert_eq!(StatusFilter::Pending.next(), StatusFilter::Completed);
        assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
    }

    #[test]
    fn stats_count_completed_and_pending() {
        let tasks = vec![
            Task::new(1, "a", "").with_completed(true),
            Task::new(2, "b", ""),
            Task::new(3, "c", ""),
        ];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats, TaskStats { total: 3, completed: 1, pending: 2 });
    }
}

use crate::effects::Effect;
use crate::error::{ApiError, StoreError};
use crate::model::{validation, AccessToken, StatusFilter, Task, TaskId, TaskStats};

use super::{Completion, Pending, RequestSeq, Sequencer};

/// The current user's tasks, newest first, plus the client-side filter.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: StatusFilter,
    search: String,
    refresh: Pending,
    mutation: Pending,
    error: Option<StoreError>,
    seq: Sequencer,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing both the status filter and the search text.
    pub fn visible(&self) -> Vec<&Task> {
        let needle = self.search.trim();
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .filter(|t| needle.is_empty() || t.matches_search(needle))
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_pending()
    }

    pub fn is_mutating(&self) -> bool {
        self.mutation.is_pending()
    }

    pub fn is_loading(&self) -> bool {
        self.is_refreshing() || self.is_mutating()
    }

    /// Forget everything belonging to the previous session. Pending requests
    /// are abandoned; their responses will be treated as stale.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.search.clear();
        self.filter = StatusFilter::default();
        self.refresh.cancel();
        self.mutation.cancel();
        self.error = None;
    }

    /// Reissued refreshes supersede earlier ones.
    pub fn refresh(&mut self, token: &AccessToken) -> Vec<Effect> {
        let seq = self.seq.next();
        self.refresh.begin(seq);
        vec![Effect::RefreshTasks {
            seq,
            token: token.clone(),
        }]
    }

    pub fn create(
        &mut self,
        token: &AccessToken,
        title: &str,
        description: &str,
        deadline: &str,
    ) -> Vec<Effect> {
        if self.mutation.is_pending() {
            return Vec::new();
        }
        match validation::new_task(title, description, deadline) {
            Ok(task) => {
                let seq = self.begin_mutation();
                vec![Effect::CreateTask {
                    seq,
                    token: token.clone(),
                    task,
                }]
            }
            Err(e) => {
                self.error = Some(e.into());
                Vec::new()
            }
        }
    }

    pub fn update(
        &mut self,
        token: &AccessToken,
        id: TaskId,
        title: &str,
        description: &str,
        deadline: &str,
        completed: bool,
    ) -> Vec<Effect> {
        if self.mutation.is_pending() {
            return Vec::new();
        }
        match validation::task_changes(title, description, deadline, completed) {
            Ok(changes) => {
                let seq = self.begin_mutation();
                vec![Effect::UpdateTask {
                    seq,
                    token: token.clone(),
                    id,
                    changes,
                }]
            }
            Err(e) => {
                self.error = Some(e.into());
                Vec::new()
            }
        }
    }

    /// Flip `completed`, sending every other field unchanged.
    pub fn toggle_completed(&mut self, token: &AccessToken, id: TaskId) -> Vec<Effect> {
        if self.mutation.is_pending() {
            return Vec::new();
        }
        let Some(task) = self.get(id) else {
            return Vec::new();
        };
        let mut changes = task.changes();
        changes.completed = !changes.completed;
        let seq = self.begin_mutation();
        vec![Effect::UpdateTask {
            seq,
            token: token.clone(),
            id,
            changes,
        }]
    }

    pub fn delete(&mut self, token: &AccessToken, id: TaskId) -> Vec<Effect> {
        if self.mutation.is_pending() {
            return Vec::new();
        }
        let seq = self.begin_mutation();
        vec![Effect::DeleteTask {
            seq,
            token: token.clone(),
            id,
        }]
    }

    pub fn apply_refresh(&mut self, seq: RequestSeq, result: Result<Vec<Task>, ApiError>) -> Completion {
        if !self.refresh.settle(seq) {
            tracing::debug!(seq = seq.get(), "discarding stale task list");
            return Completion::Stale;
        }
        self.settle(result, |store, tasks| {
            tracing::debug!(count = tasks.len(), "task list refreshed");
            store.tasks = tasks;
        })
    }

    pub fn apply_created(&mut self, seq: RequestSeq, result: Result<Task, ApiError>) -> Completion {
        if !self.mutation.settle(seq) {
            return Completion::Stale;
        }
        self.settle(result, |store, task| {
            store.tasks.retain(|t| t.id != task.id);
            store.tasks.insert(0, task);
        })
    }

    pub fn apply_updated(&mut self, seq: RequestSeq, result: Result<Task, ApiError>) -> Completion {
        if !self.mutation.settle(seq) {
            return Completion::Stale;
        }
        self.settle(result, |store, task| {
            match store.tasks.iter_mut().find(|t| t.id == task.id) {
                Some(slot) => *slot = task,
                None => store.tasks.insert(0, task),
            }
        })
    }

    pub fn apply_deleted(
        &mut self,
        seq: RequestSeq,
        id: TaskId,
        result: Result<(), ApiError>,
    ) -> Completion {
        if !self.mutation.settle(seq) {
            return Completion::Stale;
        }
        self.settle(result, |store, ()| store.tasks.retain(|t| t.id != id))
    }

    fn begin_mutation(&mut self) -> RequestSeq {
        let seq = self.seq.next();
        self.mutation.begin(seq);
        seq
    }

    /// Shared tail of every `apply_*`: success clears the error slot, a 401
    /// is handed back to the caller, anything else fills the slot.
    fn settle<T>(&mut self, result: Result<T, ApiError>, on_ok: impl FnOnce(&mut Self, T)) -> Completion {
        match result {
            Ok(value) => {
                on_ok(self, value);
                self.error = None;
                Completion::Applied
            }
            Err(e) if e.is_unauthorized() => Completion::Unauthorized,
            Err(e) => {
                tracing::warn!(error = %e, "task request failed");
                self.error = Some(e.into());
                Completion::Failed
            }
        }
    }
}

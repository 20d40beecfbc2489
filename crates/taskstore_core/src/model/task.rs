//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `Task` record returned by every backend.
//! - Define `TaskDraft`, the caller-supplied shape for create and update.
//!
//! # Invariants
//! - `id` is assigned by the store and never supplied by callers.
//! - `created_at` is stamped once at creation and never changes.
//! - `updated_at >= created_at` for every stored task.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Store-assigned task identifier.
///
/// Both backends render identifiers as decimal strings.
pub type TaskId = String;

/// Canonical stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned by the backend on create.
    pub id: TaskId,
    /// Short free-text label.
    pub title: String,
    /// Free-text description.
    pub body: String,
    /// Completion flag.
    pub completed: bool,
    /// Unix epoch milliseconds. Set once on create.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every successful update.
    pub updated_at: i64,
}

/// Mutable task fields supplied by callers on create and update.
///
/// Identity and timestamps are owned by the store, so they have no place
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub completed: bool,
}

/// Validation failures for persisted task state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task id cannot be empty")]
    EmptyId,
    #[error("updated_at ({updated_at}) must not be earlier than created_at ({created_at})")]
    UpdatedBeforeCreated { created_at: i64, updated_at: i64 },
}

impl Task {
    /// Builds a freshly created task with both timestamps set to `now`.
    pub(crate) fn from_draft(id: TaskId, draft: &TaskDraft, now: i64) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field from `draft`.
    ///
    /// # Invariants
    /// - `id` and `created_at` are left untouched.
    /// - `updated_at` never moves backwards, even if the wall clock does.
    pub(crate) fn apply_draft(&mut self, draft: &TaskDraft, now: i64) {
        self.title = draft.title.clone();
        self.body = draft.body.clone();
        self.completed = draft.completed;
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }

    /// Checks invariants that must hold for every stored task.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

impl TaskDraft {
    /// Creates an incomplete draft.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            completed: false,
        }
    }

    /// Returns the same draft with `completed` set.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            body: task.body.clone(),
            completed: task.completed,
        }
    }
}

impl From<Task> for TaskDraft {
    fn from(task: Task) -> Self {
        Self {
            title: task.title,
            body: task.body,
            completed: task.completed,
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Shared by both backends so timestamps come from one clock.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

//! Task repository contract.
//!
//! # Responsibility
//! - Define the five operations every backend exposes identically.
//!
//! # Invariants
//! - `create_task` assigns the identifier and stamps both timestamps.
//! - `update_task` replaces `title`, `body` and `completed`, keeps
//!   `created_at`, and refreshes `updated_at`.
//! - Addressing an unknown identifier yields `RepoError::NotFound` from
//!   `get_task`, `update_task` and `delete_task`.
//! - `get_all_tasks` on an empty store returns an empty vec.

use crate::model::task::{Task, TaskDraft};
use crate::repo::error::RepoResult;

/// Backend-agnostic task storage.
///
/// Callers hold `Arc<dyn TaskRepository>` and never depend on a concrete
/// backend. Returned tasks are copies; mutating them does not touch the
/// store.
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned fields.
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task>;

    fn get_task(&self, id: &str) -> RepoResult<Task>;

    /// Replaces the mutable fields of task `id` and returns the stored result.
    fn update_task(&self, id: &str, draft: &TaskDraft) -> RepoResult<Task>;

    fn delete_task(&self, id: &str) -> RepoResult<()>;

    /// Returns every stored task. Ordering is backend-defined.
    fn get_all_tasks(&self) -> RepoResult<Vec<Task>>;
}

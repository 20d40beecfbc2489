//! In-memory task repository.
//!
//! # Responsibility
//! - Serve as the default store when no database is configured.
//!
//! # Invariants
//! - One mutex guards all state; every operation holds it for its full
//!   duration, reads included.
//! - Identifiers come from a strictly increasing counter and are never
//!   reused, whatever the store size or delete history.

use crate::model::task::{now_epoch_ms, Task, TaskDraft, TaskId};
use crate::repo::error::{not_found, RepoError, RepoResult};
use crate::repo::task_repo::TaskRepository;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

const MODULE: &str = "repo.memory";

#[derive(Debug)]
struct MemoryState {
    tasks: HashMap<TaskId, Task>,
    next_id: u64,
}

/// Mutex-guarded map from identifier to task.
#[derive(Debug)]
pub struct InMemoryTaskRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| RepoError::Internal("task store lock poisoned".to_string()))
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        let mut state = self.lock()?;

        let id = state.next_id.to_string();
        state.next_id += 1;

        match state.tasks.entry(id) {
            Entry::Occupied(entry) => Err(RepoError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let task = Task::from_draft(entry.key().clone(), draft, now_epoch_ms());
                entry.insert(task.clone());
                debug!(
                    "event=task_create module={} status=ok task_id={}",
                    MODULE,
                    task.id
                );
                Ok(task)
            }
        }
    }

    fn get_task(&self, id: &str) -> RepoResult<Task> {
        let state = self.lock()?;
        let task = state
            .tasks
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("task_get", MODULE, id))?;

        debug!("event=task_get module={} status=ok task_id={}", MODULE, id);
        Ok(task)
    }

    fn update_task(&self, id: &str, draft: &TaskDraft) -> RepoResult<Task> {
        let mut state = self.lock()?;
        let task = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| not_found("task_update", MODULE, id))?;

        task.apply_draft(draft, now_epoch_ms());
        debug!(
            "event=task_update module={} status=ok task_id={}",
            MODULE,
            id
        );
        Ok(task.clone())
    }

    fn delete_task(&self, id: &str) -> RepoResult<()> {
        let mut state = self.lock()?;
        if state.tasks.remove(id).is_none() {
            return Err(not_found("task_delete", MODULE, id));
        }

        debug!(
            "event=task_delete module={} status=ok task_id={}",
            MODULE,
            id
        );
        Ok(())
    }

    fn get_all_tasks(&self) -> RepoResult<Vec<Task>> {
        let state = self.lock()?;
        let tasks: Vec<Task> = state.tasks.values().cloned().collect();
        debug!(
            "event=task_list module={} status=ok count={}",
            MODULE,
            tasks.len()
        );
        Ok(tasks)
    }
}

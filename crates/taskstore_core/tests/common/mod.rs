#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use taskstore_core::db::{open_pool, open_pool_in_memory, PoolConfig};
use taskstore_core::{InMemoryTaskRepository, SqliteTaskRepository, TaskRepository};
use tempfile::TempDir;

/// A repository under test plus whatever must outlive it.
pub struct Backend {
    pub repo: Arc<dyn TaskRepository>,
    _dir: Option<TempDir>,
}

pub fn memory_backend() -> Backend {
    Backend {
        repo: Arc::new(InMemoryTaskRepository::new()),
        _dir: None,
    }
}

pub fn sqlite_memory_backend() -> Backend {
    let pool = open_pool_in_memory().unwrap();
    Backend {
        repo: Arc::new(SqliteTaskRepository::try_new(pool).unwrap()),
        _dir: None,
    }
}

pub fn sqlite_file_backend() -> Backend {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path().join("tasks.db"), &PoolConfig::default()).unwrap();
    Backend {
        repo: Arc::new(SqliteTaskRepository::try_new(pool).unwrap()),
        _dir: Some(dir),
    }
}

/// Sleeps long enough for the millisecond clock to advance.
pub fn tick() {
    std::thread::sleep(Duration::from_millis(5));
}

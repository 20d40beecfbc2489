//! Task store core.
//! One repository contract, two interchangeable backends (in-memory and
//! SQLite), plus the startup wiring that picks between them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use config::{ConfigError, LogConfig, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{now_epoch_ms, Task, TaskDraft, TaskId, TaskValidationError};
pub use repo::error::{ErrorKind, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryTaskRepository;
pub use repo::sqlite_repo::SqliteTaskRepository;
pub use repo::task_repo::TaskRepository;
pub use store::open_repository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

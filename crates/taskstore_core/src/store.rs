//! Startup-time backend selection.

use crate::config::StoreConfig;
use crate::db::{open_pool, PoolConfig};
use crate::repo::error::RepoResult;
use crate::repo::memory_repo::InMemoryTaskRepository;
use crate::repo::sqlite_repo::SqliteTaskRepository;
use crate::repo::task_repo::TaskRepository;
use log::info;
use std::sync::Arc;

/// Builds the configured backend behind the repository trait.
///
/// Called once at startup; consumers keep the returned handle and never
/// learn which backend sits behind it.
pub fn open_repository(config: &StoreConfig) -> RepoResult<Arc<dyn TaskRepository>> {
    let repo: Arc<dyn TaskRepository> = match config {
        StoreConfig::Memory => Arc::new(InMemoryTaskRepository::new()),
        StoreConfig::Sqlite { path, pool_size } => {
            let pool_config = PoolConfig {
                pool_size: *pool_size,
                ..PoolConfig::default()
            };
            let pool = open_pool(path, &pool_config)?;
            Arc::new(SqliteTaskRepository::try_new(pool)?)
        }
    };

    info!(
        "event=store_open module=store status=ok backend={}",
        config.backend_name()
    );
    Ok(repo)
}

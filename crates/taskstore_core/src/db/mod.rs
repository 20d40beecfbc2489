//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Build pooled SQLite connections configured for the task store.
//! - Apply the idempotent `tasks` schema bootstrap.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON` and a busy timeout.
//! - Callers never receive a pool before the schema bootstrap succeeds.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;

mod open;
pub mod schema;

pub use open::{open_pool, open_pool_in_memory, PoolConfig};

/// Pool of SQLite connections shared by repository instances.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Connection checked out of a [`ConnectionPool`].
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

pub type DbResult<T> = Result<T, DbError>;

/// Opaque storage failure. Never carries domain meaning.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

//! Pooled connection bootstrap for SQLite.
//!
//! # Responsibility
//! - Build file-backed or in-memory r2d2 pools.
//! - Configure per-connection pragmas required by repository behavior.
//! - Apply the schema bootstrap before returning a usable pool.
//!
//! # Invariants
//! - Returned pools have the `tasks` schema in place.
//! - The in-memory pool keeps exactly one connection alive for its whole
//!   lifetime, since every SQLite `:memory:` connection is its own database.
//!   Checkout health checks are off for it: a replacement connection would
//!   silently start from an empty database.

use super::schema::ensure_schema;
use super::{ConnectionPool, DbResult};
use log::{error, info};
use r2d2::{CustomizeConnection, Pool};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Tuning knobs for pooled SQLite connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// SQLite busy timeout applied to every connection.
    pub busy_timeout_ms: u32,
    /// How long a caller waits to check out a connection.
    pub connection_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout_ms: 5_000,
            connection_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
    wal: bool,
}

impl CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // busy_timeout goes first so the WAL switch waits out sibling connections.
        conn.busy_timeout(Duration::from_millis(u64::from(self.busy_timeout_ms)))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if self.wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        Ok(())
    }
}

/// Opens a file-backed pool and bootstraps the `tasks` schema.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>, config: &PoolConfig) -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file pool_size={}",
        config.pool_size
    );

    let manager = SqliteConnectionManager::file(path.as_ref());
    let built = Pool::builder()
        .max_size(config.pool_size.max(1))
        .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
            wal: true,
        }))
        .build(manager);

    finish_open(built, "file", started_at)
}

/// Opens a single-connection in-memory pool and bootstraps the schema.
///
/// The one connection never idles out, expires or gets swapped by a failed
/// checkout test, so stored tasks live as long as the pool does.
pub fn open_pool_in_memory() -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory pool_size=1");

    let config = PoolConfig::default();
    let built = Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .test_on_check_out(false)
        .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
            wal: false,
        }))
        .build(SqliteConnectionManager::memory());

    finish_open(built, "memory", started_at)
}

fn finish_open(
    built: Result<ConnectionPool, r2d2::Error>,
    mode: &str,
    started_at: Instant,
) -> DbResult<ConnectionPool> {
    let pool = match built {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_pool_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap(pool: &ConnectionPool) -> DbResult<()> {
    let conn = pool.get()?;
    ensure_schema(&conn)
}

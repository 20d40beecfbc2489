//! `tasks` table bootstrap and layout checks.
//!
//! # Invariants
//! - Bootstrap is idempotent; running it on a ready database is a no-op.
//! - The repository only relies on the columns listed in
//!   [`REQUIRED_TASK_COLUMNS`], whatever else the table carries.

use super::DbResult;
use rusqlite::{Connection, OptionalExtension};

pub const TASKS_TABLE: &str = "tasks";

pub const REQUIRED_TASK_COLUMNS: &[&str] =
    &["id", "title", "body", "completed", "created_at", "updated_at"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `tasks` table and its index when missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table` exists in the main schema.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Returns the first required column that `table` lacks, if any.
pub fn first_missing_column(
    conn: &Connection,
    table: &str,
    required: &[&'static str],
) -> DbResult<Option<&'static str>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(required
        .iter()
        .copied()
        .find(|column| !present.iter().any(|name| name == column)))
}

//! SQLite-backed task repository.
//!
//! # Responsibility
//! - Implement the task contract over the `tasks` table.
//! - Translate driver outcomes into the repository error taxonomy.
//!
//! # Invariants
//! - Every operation is a single statement on one pooled connection; no
//!   in-process locking, isolation is left to SQLite.
//! - "No row" on get/update and zero affected rows on delete are the only
//!   sources of `NotFound`. Every other failure passes through as `Db`.
//! - Read paths reject rows that break `Task::validate()` instead of
//!   masking them.

use crate::db::schema::{
    first_missing_column, table_exists, REQUIRED_TASK_COLUMNS, TASKS_TABLE,
};
use crate::db::{ConnectionPool, PooledConnection};
use crate::model::task::{now_epoch_ms, Task, TaskDraft};
use crate::repo::error::{not_found, RepoError, RepoResult};
use crate::repo::task_repo::TaskRepository;
use log::{debug, error};
use rusqlite::{params, Row};

const MODULE: &str = "repo.sqlite";

const TASK_COLUMNS_SQL: &str = "id, title, body, completed, created_at, updated_at";

/// Pool-backed task repository.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: ConnectionPool,
}

impl SqliteTaskRepository {
    /// Wraps a pool after checking that the `tasks` layout is usable.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `tasks` does not exist.
    /// - `MissingRequiredColumn` when a required column is absent.
    pub fn try_new(pool: ConnectionPool) -> RepoResult<Self> {
        {
            let conn = pool.get()?;
            ensure_layout(&conn)?;
        }
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn conn(&self) -> RepoResult<PooledConnection> {
        Ok(self.pool.get()?)
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        let conn = self.conn()?;
        let now = now_epoch_ms();

        let row_id = conn
            .query_row(
                "INSERT INTO tasks (title, body, completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 RETURNING id;",
                params![
                    draft.title.as_str(),
                    draft.body.as_str(),
                    bool_to_int(draft.completed),
                    now
                ],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|err| log_backend_failure("task_create", err.into()))?;

        let task = Task::from_draft(row_id.to_string(), draft, now);
        debug!(
            "event=task_create module={} status=ok task_id={}",
            MODULE,
            task.id
        );
        Ok(task)
    }

    fn get_task(&self, id: &str) -> RepoResult<Task> {
        let Some(row_id) = parse_row_id(id) else {
            return Err(not_found("task_get", MODULE, id));
        };

        let conn = self.conn()?;
        let outcome = conn.query_row(
            &format!("SELECT {TASK_COLUMNS_SQL} FROM tasks WHERE id = ?1;"),
            [row_id],
            |row| Ok(parse_task_row(row)),
        );

        match outcome {
            Ok(task) => {
                let task = task?;
                debug!("event=task_get module={} status=ok task_id={}", MODULE, id);
                Ok(task)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(not_found("task_get", MODULE, id)),
            Err(err) => Err(log_backend_failure("task_get", err.into())),
        }
    }

    fn update_task(&self, id: &str, draft: &TaskDraft) -> RepoResult<Task> {
        let Some(row_id) = parse_row_id(id) else {
            return Err(not_found("task_update", MODULE, id));
        };

        let conn = self.conn()?;
        // RETURNING yields one row per affected row, so "no row" is the
        // zero-affected-rows witness.
        let outcome = conn.query_row(
            &format!(
                "UPDATE tasks
                 SET
                    title = ?1,
                    body = ?2,
                    completed = ?3,
                    updated_at = max(?4, updated_at, created_at)
                 WHERE id = ?5
                 RETURNING {TASK_COLUMNS_SQL};"
            ),
            params![
                draft.title.as_str(),
                draft.body.as_str(),
                bool_to_int(draft.completed),
                now_epoch_ms(),
                row_id
            ],
            |row| Ok(parse_task_row(row)),
        );

        match outcome {
            Ok(task) => {
                let task = task?;
                debug!(
                    "event=task_update module={} status=ok task_id={}",
                    MODULE,
                    task.id
                );
                Ok(task)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(not_found("task_update", MODULE, id)),
            Err(err) => Err(log_backend_failure("task_update", err.into())),
        }
    }

    fn delete_task(&self, id: &str) -> RepoResult<()> {
        let Some(row_id) = parse_row_id(id) else {
            return Err(not_found("task_delete", MODULE, id));
        };

        let conn = self.conn()?;
        let changed = conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [row_id])
            .map_err(|err| log_backend_failure("task_delete", err.into()))?;

        if changed == 0 {
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
        let conn = self.conn()?;
        let tasks = list_tasks(&conn).map_err(|err| log_backend_failure("task_list", err))?;
        debug!(
            "event=task_list module={} status=ok count={}",
            MODULE,
            tasks.len()
        );
        Ok(tasks)
    }
}

fn list_tasks(conn: &PooledConnection) -> RepoResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS_SQL} FROM tasks ORDER BY created_at DESC, id DESC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn ensure_layout(conn: &PooledConnection) -> RepoResult<()> {
    if !table_exists(conn, TASKS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(TASKS_TABLE));
    }
    if let Some(column) = first_missing_column(conn, TASKS_TABLE, REQUIRED_TASK_COLUMNS)? {
        return Err(RepoError::MissingRequiredColumn {
            table: TASKS_TABLE,
            column,
        });
    }
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id: row.get::<_, i64>("id")?.to_string(),
        title: row.get("title")?,
        body: row.get("body")?,
        completed,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

/// Accepts only the canonical decimal form of a positive row id, so every
/// stored task has exactly one spelling.
fn parse_row_id(id: &str) -> Option<i64> {
    let value = id.parse::<i64>().ok()?;
    (value > 0 && value.to_string() == id).then_some(value)
}

fn log_backend_failure(event: &str, err: RepoError) -> RepoError {
    if matches!(err, RepoError::Db(_)) {
        error!(
            "event={} module={} status=error error_code={} error={}",
            event,
            MODULE,
            err.error_code(),
            err
        );
    }
    err
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

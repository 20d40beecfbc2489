//! Repository error taxonomy.
//!
//! Domain outcomes (`NotFound`, `AlreadyExists`) stay distinct from opaque
//! storage failures, which pass through as [`RepoError::Db`] untouched.

use crate::db::DbError;
use crate::model::task::{TaskId, TaskValidationError};
use log::debug;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// The addressed identifier does not exist in the store.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// A create would overwrite an identifier that is already stored.
    #[error("task already exists: {0}")]
    AlreadyExists(TaskId),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted task data: {0}")]
    InvalidData(String),
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse outcome class for transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Maps to a "missing resource" response.
    NotFound,
    /// Maps to a "conflict" response.
    Conflict,
    /// Maps to a generic server failure.
    Backend,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::Conflict,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::Internal(_) => ErrorKind::Backend,
        }
    }

    /// Stable snake_case code for log lines and transport payloads.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "task_not_found",
            Self::AlreadyExists(_) => "task_already_exists",
            Self::Db(DbError::Sqlite(_)) => "db_error",
            Self::Db(DbError::Pool(_)) => "db_pool_error",
            Self::InvalidData(_) => "invalid_data",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Builds `NotFound` for `id` and records the miss at `debug`.
pub(crate) fn not_found(event: &str, module: &str, id: &str) -> RepoError {
    debug!(
        "event={} module={} status=not_found task_id={}",
        event, module, id
    );
    RepoError::NotFound(id.to_string())
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

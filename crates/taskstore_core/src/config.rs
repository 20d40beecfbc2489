//! Process configuration for backend selection and logging.
//!
//! # Responsibility
//! - Describe which backend the process uses, chosen once at startup.
//! - Read configuration from `TASKSTORE_*` environment variables.
//!
//! # Invariants
//! - Missing variables fall back to the in-memory backend with logging off.
//! - Present-but-invalid values are errors, never silently defaulted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_BACKEND: &str = "TASKSTORE_BACKEND";
pub const ENV_DB_PATH: &str = "TASKSTORE_DB_PATH";
pub const ENV_POOL_SIZE: &str = "TASKSTORE_POOL_SIZE";
pub const ENV_LOG_LEVEL: &str = "TASKSTORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKSTORE_LOG_DIR";

const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown backend `{0}`; expected memory|sqlite")]
    UnknownBackend(String),
    #[error("TASKSTORE_DB_PATH is required when TASKSTORE_BACKEND=sqlite")]
    MissingDbPath,
    #[error("invalid pool size `{0}`; expected a positive integer")]
    InvalidPoolSize(String),
}

/// Storage backend selected at process startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    #[default]
    Memory,
    Sqlite {
        path: PathBuf,
        #[serde(default = "default_pool_size")]
        pool_size: u32,
    },
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

impl StoreConfig {
    /// Reads `TASKSTORE_BACKEND`, `TASKSTORE_DB_PATH` and
    /// `TASKSTORE_POOL_SIZE` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = non_empty(lookup(ENV_BACKEND)).unwrap_or_else(|| "memory".to_string());

        match backend.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => {
                let path = non_empty(lookup(ENV_DB_PATH)).ok_or(ConfigError::MissingDbPath)?;
                let pool_size = match non_empty(lookup(ENV_POOL_SIZE)) {
                    Some(raw) => parse_pool_size(&raw)?,
                    None => DEFAULT_POOL_SIZE,
                };
                Ok(Self::Sqlite {
                    path: PathBuf::from(path),
                    pool_size,
                })
            }
            _ => Err(ConfigError::UnknownBackend(backend)),
        }
    }

    /// Short backend label for log lines.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// File logging settings. Logging stays off when no directory is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

impl LogConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = non_empty(lookup(ENV_LOG_DIR))?;
        let level = non_empty(lookup(ENV_LOG_LEVEL))
            .unwrap_or_else(|| crate::logging::default_log_level().to_string());
        Some(Self {
            level,
            log_dir: PathBuf::from(log_dir),
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidPoolSize(raw.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

//! Repository layer abstractions and backend implementations.
//!
//! # Responsibility
//! - Define the `TaskRepository` contract consumed by transport layers.
//! - Provide the in-memory and SQLite backends behind that contract.
//!
//! # Invariants
//! - Both backends return identical domain errors for identical inputs.
//! - Storage failures are passed through as `RepoError::Db`, never
//!   reclassified as domain errors.

pub mod error;
pub mod memory_repo;
pub mod sqlite_repo;
pub mod task_repo;

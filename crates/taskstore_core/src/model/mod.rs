//! Domain model for the task store.
//!
//! # Responsibility
//! - Define the one canonical task shape shared by every backend.
//!
//! # Invariants
//! - Every stored task is identified by a store-assigned `TaskId`.
//! - Deletion is a hard delete; there are no tombstones or versions.

pub mod task;

//! Task store trait and error types
//!
//! The task store is the only shared mutable resource between concurrently
//! running tasks. Every operation is a single atomic write or read keyed by
//! task id; no multi-key transactions are required.

use crate::state::{CrawlTask, TaskStatus};
use thiserror::Error;

/// Errors that can occur during task store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for task store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for task store backends
///
/// Implementations must support concurrent independent updates keyed by
/// task id; each task owns its own row, so no cross-task locking is needed.
pub trait TaskStore {
    /// Inserts a new task row
    fn insert_task(&mut self, task: &CrawlTask) -> StorageResult<()>;

    /// Gets a task by id
    fn get_task(&self, task_id: &str) -> StorageResult<CrawlTask>;

    /// Updates the status of a task
    fn update_status(&mut self, task_id: &str, status: TaskStatus) -> StorageResult<()>;

    /// Updates the progress percentage and message of a task
    fn update_progress(&mut self, task_id: &str, progress: u8, message: &str)
        -> StorageResult<()>;

    /// Marks a task completed, storing its serialized report
    fn complete_task(&mut self, task_id: &str, result_json: &str) -> StorageResult<()>;

    /// Marks a task failed, storing the error detail
    fn fail_task(&mut self, task_id: &str, error: &str) -> StorageResult<()>;

    /// Lists tasks, optionally filtered by status, newest first
    fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        limit: u32,
        offset: u32,
    ) -> StorageResult<Vec<CrawlTask>>;

    /// Deletes a task by id
    fn delete_task(&mut self, task_id: &str) -> StorageResult<()>;

    /// Counts tasks in a given status
    fn count_tasks_by_status(&self, status: TaskStatus) -> StorageResult<u64>;

    /// Counts all tasks
    fn count_total_tasks(&self) -> StorageResult<u64>;
}

//! Task state tracker
//!
//! The tracker owns all task mutations. It enforces monotonic status
//! transitions (`pending -> running -> {completed, failed}`) and computes
//! the progress percentage reported before each fetch. Every call maps to a
//! single atomic store write keyed by task id.

use crate::crawler::CrawlReport;
use crate::state::{CrawlTask, TaskStatus};
use crate::storage::{StorageError, StorageResult, TaskStore};

/// Computes the progress percentage for a task
///
/// Defined as `floor(pages_collected / max_pages * 100)`, clamped to 100.
pub fn progress_percent(pages_collected: u32, max_pages: u32) -> u8 {
    if max_pages == 0 {
        return 100;
    }
    let percent = (pages_collected as u64 * 100) / max_pages as u64;
    percent.min(100) as u8
}

/// Tracks task lifecycle over a task store
pub struct TaskTracker<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskTracker<S> {
    /// Creates a tracker over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the tracker, returning the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Gives direct read access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new pending task
    pub fn create(&mut self, task: &CrawlTask) -> StorageResult<()> {
        tracing::debug!("Creating task {} for {}", task.id, task.url);
        self.store.insert_task(task)
    }

    /// Transitions a task to a new status
    ///
    /// Re-asserting the current (non-terminal) status is a no-op; any
    /// transition that would move backwards or leave a terminal state is
    /// rejected.
    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> StorageResult<()> {
        let current = self.store.get_task(task_id)?;

        if current.status == status {
            return Ok(());
        }

        if !current.status.can_transition_to(status) {
            return Err(StorageError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        tracing::debug!("Task {}: {} -> {}", task_id, current.status, status);
        self.store.update_status(task_id, status)
    }

    /// Records progress for a running task
    ///
    /// Called by the orchestrator before each fetch.
    pub fn set_progress(
        &mut self,
        task_id: &str,
        pages_collected: u32,
        max_pages: u32,
        message: &str,
    ) -> StorageResult<()> {
        let percent = progress_percent(pages_collected, max_pages);
        self.store.update_progress(task_id, percent, message)
    }

    /// Completes a task with its final report
    pub fn complete(&mut self, task_id: &str, report: &CrawlReport) -> StorageResult<()> {
        let current = self.store.get_task(task_id)?;
        if !current.status.can_transition_to(TaskStatus::Completed) {
            return Err(StorageError::InvalidTransition {
                from: current.status,
                to: TaskStatus::Completed,
            });
        }

        let result_json = serde_json::to_string(report)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tracing::info!(
            "Task {} completed: {} pages, depth {}",
            task_id,
            report.total_pages,
            report.depth_reached
        );
        self.store.complete_task(task_id, &result_json)
    }

    /// Fails a task with an error message
    pub fn fail(&mut self, task_id: &str, error: &str) -> StorageResult<()> {
        let current = self.store.get_task(task_id)?;
        if !current.status.can_transition_to(TaskStatus::Failed) {
            return Err(StorageError::InvalidTransition {
                from: current.status,
                to: TaskStatus::Failed,
            });
        }

        tracing::warn!("Task {} failed: {}", task_id, error);
        self.store.fail_task(task_id, error)
    }

    /// Gets the current task row
    pub fn get(&self, task_id: &str) -> StorageResult<CrawlTask> {
        self.store.get_task(task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlReport;
    use crate::storage::SqliteTaskStore;

    fn tracker_with_task() -> (TaskTracker<SqliteTaskStore>, CrawlTask) {
        let store = SqliteTaskStore::new_in_memory().unwrap();
        let mut tracker = TaskTracker::new(store);
        let task = CrawlTask::new("https://example.com/", 1, 10);
        tracker.create(&task).unwrap();
        (tracker, task)
    }

    #[test]
    fn test_progress_percent_floor() {
        assert_eq!(progress_percent(0, 10), 0);
        assert_eq!(progress_percent(1, 10), 10);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn test_progress_percent_clamped() {
        assert_eq!(progress_percent(20, 10), 100);
    }

    #[test]
    fn test_status_lifecycle() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        assert_eq!(tracker.get(&task.id).unwrap().status, TaskStatus::Running);

        tracker.fail(&task.id, "boom").unwrap();
        assert_eq!(tracker.get(&task.id).unwrap().status, TaskStatus::Failed);
    }

    #[test]
    fn test_backward_transition_rejected() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        let result = tracker.set_status(&task.id, TaskStatus::Pending);
        assert!(matches!(
            result,
            Err(StorageError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_terminal_state_is_final() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        tracker.fail(&task.id, "boom").unwrap();

        assert!(tracker.set_status(&task.id, TaskStatus::Running).is_err());
        assert!(tracker.fail(&task.id, "again").is_err());

        let report = CrawlReport::build(task.id.clone(), vec![], vec![], 0);
        assert!(tracker.complete(&task.id, &report).is_err());
    }

    #[test]
    fn test_reassert_running_is_noop() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        // A retried attempt re-asserts running without error
        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        assert_eq!(tracker.get(&task.id).unwrap().status, TaskStatus::Running);
    }

    #[test]
    fn test_complete_stores_report_json() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        let report = CrawlReport::build(
            task.id.clone(),
            vec![],
            vec!["https://example.com/".to_string()],
            1,
        );
        tracker.complete(&task.id, &report).unwrap();

        let loaded = tracker.get(&task.id).unwrap();
        assert_eq!(loaded.status, TaskStatus::Completed);
        assert_eq!(loaded.progress, 100);

        let stored: CrawlReport = serde_json::from_str(loaded.result.as_deref().unwrap()).unwrap();
        assert_eq!(stored.task_id, task.id);
        assert_eq!(stored.crawled_urls, vec!["https://example.com/"]);
    }

    #[test]
    fn test_set_progress() {
        let (mut tracker, task) = tracker_with_task();

        tracker.set_status(&task.id, TaskStatus::Running).unwrap();
        tracker
            .set_progress(&task.id, 4, 10, "Crawling https://example.com/x")
            .unwrap();

        let loaded = tracker.get(&task.id).unwrap();
        assert_eq!(loaded.progress, 40);
        assert_eq!(loaded.message, "Crawling https://example.com/x");
    }
}

//! Bounded retry driver
//!
//! Re-runs a task from scratch when the orchestrator returns an error,
//! up to the configured attempt count with a fixed delay between attempts.
//! Intermediate failures leave the task `running`; only the final failure
//! (or a cancellation) marks it `failed`.

use std::time::Duration;

use crate::config::CrawlerConfig;
use crate::crawler::orchestrator::{CancelFlag, Orchestrator};
use crate::crawler::report::CrawlReport;
use crate::state::{CrawlTask, TaskTracker};
use crate::storage::TaskStore;
use crate::{CrawlError, Result};

/// Drives a task through its retry budget
pub struct TaskRunner<'a> {
    config: &'a CrawlerConfig,
    cancel: CancelFlag,
}

impl<'a> TaskRunner<'a> {
    pub fn new(config: &'a CrawlerConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::default(),
        }
    }

    /// A clone of the flag that cancels the task before its next fetch
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Executes the task, retrying whole runs on unexpected errors
    ///
    /// At most `1 + retry-attempts` runs. Cancellation is never retried.
    pub async fn execute<S: TaskStore>(
        &self,
        tracker: &mut TaskTracker<S>,
        task: &CrawlTask,
    ) -> Result<CrawlReport> {
        let max_attempts = 1 + self.config.retry_attempts;

        for attempt in 1..=max_attempts {
            let orchestrator = Orchestrator::with_cancel_flag(self.config, self.cancel.clone());

            match orchestrator.run(tracker, task).await {
                Ok(report) => return Ok(report),
                Err(CrawlError::Cancelled) => {
                    tracker.fail(&task.id, "Task cancelled")?;
                    return Err(CrawlError::Cancelled);
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        "Task {} attempt {}/{} failed: {}; retrying in {}s",
                        task.id,
                        attempt,
                        max_attempts,
                        e,
                        self.config.retry_delay_secs
                    );
                    tokio::time::sleep(Duration::from_secs(self.config.retry_delay_secs)).await;
                }
                Err(e) => {
                    let message = format!("Crawl task failed: {}", e);
                    tracing::error!("Task {} exhausted retries: {}", task.id, message);
                    tracker.fail(&task.id, &message)?;
                    return Err(e);
                }
            }
        }

        // retry_attempts is validated non-negative and bounded, so the loop
        // always returns before falling through
        Err(CrawlError::TaskExecution(
            "retry loop exited without a result".to_string(),
        ))
    }
}

//! Task lifecycle state
//!
//! Status definitions, the task record, and the tracker that owns all task
//! mutations.

mod task;
mod tracker;

pub use task::{CrawlTask, TaskStatus};
pub use tracker::{progress_percent, TaskTracker};

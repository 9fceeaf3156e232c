//! Task status definitions and the task record
//!
//! A crawl task moves through `pending -> running -> {completed, failed}`.
//! Terminal states never transition again.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has been created but not yet picked up
    Pending,

    /// Task is currently being crawled
    Running,

    /// Task finished and its report is stored
    Completed,

    /// Task aborted; only the error message is stored
    Failed,
}

impl TaskStatus {
    /// Returns true if this is a terminal state (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true when moving from `self` to `next` is a legal transition
    ///
    /// Transitions are monotonic: `pending -> running -> {completed, failed}`.
    /// A transition to the current status is allowed as a no-op so that a
    /// retried attempt can re-assert `running` without violating ordering.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        if *self == next {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its database string representation
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> [Self; 4] {
        [Self::Pending, Self::Running, Self::Completed, Self::Failed]
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// A crawl task row
///
/// Owned by the task tracker; the orchestrator mutates it only through
/// tracker transition calls.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlTask {
    /// Opaque, globally unique task identifier (UUID v4)
    pub id: String,

    /// The seed URL the traversal starts from
    pub url: String,

    /// Maximum traversal depth
    pub depth: u32,

    /// Maximum number of pages to collect
    pub max_pages: u32,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Progress percentage, 0-100
    pub progress: u8,

    /// Human-readable progress message
    pub message: String,

    /// Serialized CrawlReport, set on completion
    pub result: Option<String>,

    /// Error detail, set on failure
    pub error: Option<String>,

    /// RFC 3339 creation timestamp
    pub created_at: String,

    /// RFC 3339 completion timestamp, set on a terminal transition
    pub completed_at: Option<String>,
}

impl CrawlTask {
    /// Creates a new pending task with a fresh UUID
    pub fn new(seed_url: &str, depth: u32, max_pages: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: seed_url.to_string(),
            depth,
            max_pages,
            status: TaskStatus::Pending,
            progress: 0,
            message: String::new(),
            result: None,
            error: None,
            created_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }
}

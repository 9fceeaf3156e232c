//! Task statistics
//!
//! Aggregates task counts per status from the store and prints them in a
//! readable summary.

use std::collections::BTreeMap;

use crate::state::TaskStatus;
use crate::storage::{StorageResult, TaskStore};
use serde::{Deserialize, Serialize};

/// Task counts grouped by status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub tasks_by_status: BTreeMap<String, u64>,
    pub total_tasks: u64,
}

/// Loads task counts from the store
pub fn load_statistics<S: TaskStore>(store: &S) -> StorageResult<TaskStatistics> {
    let mut tasks_by_status = BTreeMap::new();
    for status in TaskStatus::all_statuses() {
        let count = store.count_tasks_by_status(status)?;
        tasks_by_status.insert(status.to_string(), count);
    }

    Ok(TaskStatistics {
        tasks_by_status,
        total_tasks: store.count_total_tasks()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &TaskStatistics) {
    println!("=== Task Statistics ===\n");

    println!("Tasks by Status:");
    for (status, count) in &stats.tasks_by_status {
        let percentage = if stats.total_tasks > 0 {
            (*count as f64 / stats.total_tasks as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    let completed = stats
        .tasks_by_status
        .get(&TaskStatus::Completed.to_string())
        .copied()
        .unwrap_or(0);
    let success_rate = if stats.total_tasks > 0 {
        (completed as f64 / stats.total_tasks as f64) * 100.0
    } else {
        0.0
    };

    println!("Total tasks: {}", stats.total_tasks);
    println!(
        "Success Rate: {:.1}% ({} / {} tasks completed)",
        success_rate, completed, stats.total_tasks
    );
}

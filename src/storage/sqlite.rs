//! SQLite task store implementation

use crate::state::{CrawlTask, TaskStatus};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{StorageError, StorageResult, TaskStore};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::path::Path;

const TASK_COLUMNS: &str =
    "id, url, depth, max_pages, status, progress, message, result, error, created_at, completed_at";

/// SQLite-backed task store
pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Opens (or creates) the task database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteTaskStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory task store (for testing)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_task(row: &Row<'_>) -> rusqlite::Result<CrawlTask> {
        let status_str: String = row.get(4)?;
        Ok(CrawlTask {
            id: row.get(0)?,
            url: row.get(1)?,
            depth: row.get(2)?,
            max_pages: row.get(3)?,
            status: TaskStatus::from_db_string(&status_str).unwrap_or(TaskStatus::Failed),
            progress: row.get(5)?,
            message: row.get(6)?,
            result: row.get(7)?,
            error: row.get(8)?,
            created_at: row.get(9)?,
            completed_at: row.get(10)?,
        })
    }

    fn ensure_updated(&self, task_id: &str, changed: usize) -> StorageResult<()> {
        if changed == 0 {
            return Err(StorageError::TaskNotFound(task_id.to_string()));
        }
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn insert_task(&mut self, task: &CrawlTask) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO tasks (id, url, depth, max_pages, status, progress, message, result, error, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                task.id,
                task.url,
                task.depth,
                task.max_pages,
                task.status.to_db_string(),
                task.progress,
                task.message,
                task.result,
                task.error,
                task.created_at,
                task.completed_at,
            ],
        )?;
        Ok(())
    }

    fn get_task(&self, task_id: &str) -> StorageResult<CrawlTask> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS))?;

        stmt.query_row(params![task_id], Self::row_to_task)
            .map_err(|_| StorageError::TaskNotFound(task_id.to_string()))
    }

    fn update_status(&mut self, task_id: &str, status: TaskStatus) -> StorageResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.to_db_string(), task_id],
        )?;
        self.ensure_updated(task_id, changed)
    }

    fn update_progress(
        &mut self,
        task_id: &str,
        progress: u8,
        message: &str,
    ) -> StorageResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET progress = ?1, message = ?2 WHERE id = ?3",
            params![progress, message, task_id],
        )?;
        self.ensure_updated(task_id, changed)
    }

    fn complete_task(&mut self, task_id: &str, result_json: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1, result = ?2, progress = 100, completed_at = ?3 WHERE id = ?4",
            params![TaskStatus::Completed.to_db_string(), result_json, now, task_id],
        )?;
        self.ensure_updated(task_id, changed)
    }

    fn fail_task(&mut self, task_id: &str, error: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1, error = ?2, completed_at = ?3 WHERE id = ?4",
            params![TaskStatus::Failed.to_db_string(), error, now, task_id],
        )?;
        self.ensure_updated(task_id, changed)
    }

    fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        limit: u32,
        offset: u32,
    ) -> StorageResult<Vec<CrawlTask>> {
        let mut tasks = Vec::new();

        match status {
            Some(status) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM tasks WHERE status = ?1 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3",
                    TASK_COLUMNS
                ))?;
                let rows =
                    stmt.query_map(params![status.to_db_string(), limit, offset], Self::row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM tasks ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
                    TASK_COLUMNS
                ))?;
                let rows = stmt.query_map(params![limit, offset], Self::row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
        }

        Ok(tasks)
    }

    fn delete_task(&mut self, task_id: &str) -> StorageResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
        self.ensure_updated(task_id, changed)
    }

    fn count_tasks_by_status(&self, status: TaskStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_total_tasks(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

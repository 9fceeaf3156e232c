//! Task store backends
//!
//! The store holds one row per crawl task, keyed by task id. Listing,
//! filtering, and export endpoints read from it; the task tracker is the
//! only writer during a crawl.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteTaskStore;
pub use traits::{StorageError, StorageResult, TaskStore};

//! Result export and reporting

pub mod csv;
pub mod stats;

pub use csv::{export_csv, report_to_csv};
pub use stats::{load_statistics, print_statistics, TaskStatistics};

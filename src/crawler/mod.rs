//! Crawl engine
//!
//! The frontier manages the BFS queue, the fetcher does the per-page HTTP
//! work, the orchestrator ties fetch/extract/analyze into one task run, and
//! the runner drives the bounded retry loop around it.

pub mod fetcher;
pub mod frontier;
pub mod orchestrator;
pub mod report;
pub mod runner;

pub use fetcher::{build_http_client, fetch_url, FetchOutcome, USER_AGENT};
pub use frontier::Frontier;
pub use orchestrator::{CancelFlag, Orchestrator};
pub use report::{CrawlReport, PageRecord, ReportSummary};
pub use runner::TaskRunner;

//! Crawl orchestrator
//!
//! Runs one task end to end: breadth-first traversal under the page and
//! depth budgets, per-page fetch/extract/analyze, progress updates before
//! each fetch, and the mandatory politeness delay after every fetch. A page
//! failure becomes an error record; only unexpected failures (storage,
//! cancellation) abort the run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::analysis::analyze_page;
use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::report::{CrawlReport, PageRecord};
use crate::extract::{extract_content, PageDocument};
use crate::state::{CrawlTask, TaskStatus, TaskTracker};
use crate::storage::TaskStore;
use crate::{CrawlError, Result};

/// Shared flag for cooperative cancellation, checked before each fetch
pub type CancelFlag = Arc<AtomicBool>;

/// Executes one crawl task
pub struct Orchestrator<'a> {
    config: &'a CrawlerConfig,
    cancel: CancelFlag,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator with a fresh cancellation flag
    pub fn new(config: &'a CrawlerConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an orchestrator sharing an external cancellation flag
    pub fn with_cancel_flag(config: &'a CrawlerConfig, cancel: CancelFlag) -> Self {
        Self { config, cancel }
    }

    /// A clone of the cancellation flag; set it to stop the crawl before
    /// its next fetch
    pub fn cancel_flag(&self) -> CancelFlag {
        Arc::clone(&self.cancel)
    }

    /// Runs the task to completion
    ///
    /// On success the final report is stored on the task row and returned.
    /// On error the task row is left as-is so the retry driver can decide
    /// whether to re-run or fail it.
    pub async fn run<S: TaskStore>(
        &self,
        tracker: &mut TaskTracker<S>,
        task: &CrawlTask,
    ) -> Result<CrawlReport> {
        tracing::info!(
            "Starting crawl task {} for {} (depth {}, max pages {})",
            task.id,
            task.url,
            task.depth,
            task.max_pages
        );
        tracker.set_status(&task.id, TaskStatus::Running)?;

        let client = build_http_client(self.config)?;
        let delay = Duration::from_millis(self.config.request_delay_ms);

        let mut frontier = Frontier::new(&task.url);
        let mut pages: Vec<PageRecord> = Vec::new();
        let mut current_depth: u32 = 0;

        while frontier.has_current()
            && (pages.len() as u32) < task.max_pages
            && current_depth < task.depth
        {
            while (pages.len() as u32) < task.max_pages {
                let Some(url) = frontier.next_url() else {
                    break;
                };

                if self.cancel.load(Ordering::Relaxed) {
                    tracing::info!("Task {} cancelled", task.id);
                    return Err(CrawlError::Cancelled);
                }

                tracker.set_progress(
                    &task.id,
                    pages.len() as u32,
                    task.max_pages,
                    &format!("Crawling {}", url),
                )?;

                let record = self
                    .crawl_page(&client, &url, current_depth, task, &mut frontier)
                    .await;
                pages.push(record);

                // Politeness pause after every fetch, success or failure
                tokio::time::sleep(delay).await;
            }

            current_depth += 1;
            if !frontier.advance_level() {
                break;
            }
        }

        let report = CrawlReport::build(
            task.id.clone(),
            pages,
            frontier.into_visited(),
            current_depth,
        );
        tracker.complete(&task.id, &report)?;

        tracing::info!(
            "Crawl task {} completed: {} pages, depth {}",
            task.id,
            report.total_pages,
            report.depth_reached
        );
        Ok(report)
    }

    /// Fetches and analyzes one page, queueing its internal links when the
    /// next level is still within the depth budget
    async fn crawl_page(
        &self,
        client: &Client,
        url: &str,
        current_depth: u32,
        task: &CrawlTask,
        frontier: &mut Frontier,
    ) -> PageRecord {
        let record = match fetch_url(client, url).await {
            FetchOutcome::Success {
                status_code,
                body,
                content_length,
            } => build_page_record(url, status_code, &body, content_length),
            FetchOutcome::Failure {
                status_code,
                message,
            } => PageRecord::failure(url, status_code, &message),
        };

        if !record.is_error() && current_depth + 1 < task.depth {
            for link in &record.links {
                if link.internal {
                    frontier.enqueue(&link.url);
                }
            }
        }

        record
    }
}

/// Builds the full page record from a fetched body
///
/// Parsing and every analysis facet happen here, synchronously; the parsed
/// document never crosses an await point.
fn build_page_record(url: &str, status_code: u16, body: &str, content_length: usize) -> PageRecord {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => return PageRecord::failure(url, Some(status_code), &format!("Bad URL: {}", e)),
    };

    let doc = PageDocument::parse(body, &parsed);
    let content = extract_content(&doc);
    let analysis = analyze_page(&doc, &content.title, &content.description);

    PageRecord {
        url: url.to_string(),
        status_code: Some(status_code),
        title: content.title,
        description: content.description,
        headings: content.headings,
        paragraphs: content.paragraphs,
        links: content.links,
        images: content.images,
        content_length,
        seo: Some(analysis.seo),
        social_media: analysis.social_media,
        contact_info: Some(analysis.contact_info),
        content_quality: Some(analysis.content_quality),
        structured_data: Some(analysis.structured_data),
        scraped_at: chrono::Utc::now().to_rfc3339(),
        error: None,
    }
}

//! Crawl result records
//!
//! `PageRecord` is the immutable per-page output of the pipeline;
//! `CrawlReport` is the final payload stored on the task row when a crawl
//! completes. Field names here are a compatibility contract with the export
//! and listing surfaces that consume the stored JSON.

use crate::analysis::{ContactInfo, ContentQuality, SeoAnalysis, StructuredData};
use crate::extract::{Heading, PageLink};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;

/// One crawled page, successful or failed
///
/// A failed fetch still produces a record: url, error, and timestamp are
/// set, everything else stays empty. Records are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_code: Option<u16>,
    pub title: String,
    pub description: String,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub links: Vec<PageLink>,
    pub images: Vec<String>,
    pub content_length: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seo: Option<SeoAnalysis>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub social_media: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content_quality: Option<ContentQuality>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub structured_data: Option<StructuredData>,
    pub scraped_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl PageRecord {
    /// Builds the record for a failed fetch
    pub fn failure(url: &str, status_code: Option<u16>, error: &str) -> Self {
        Self {
            url: url.to_string(),
            status_code,
            title: String::new(),
            description: String::new(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            content_length: 0,
            seo: None,
            social_media: BTreeMap::new(),
            contact_info: None,
            content_quality: None,
            structured_data: None,
            scraped_at: Utc::now().to_rfc3339(),
            error: Some(error.to_string()),
        }
    }

    /// True when this record came from a failed fetch
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregate numbers over all pages in a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_words: usize,
    pub total_images: usize,
    pub total_links: usize,
    pub distinct_domains: usize,
    pub average_page_size: f64,
}

/// Final crawl payload stored on the completed task row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub task_id: String,
    pub total_pages: usize,
    pub crawled_urls: Vec<String>,
    pub pages: Vec<PageRecord>,
    pub depth_reached: u32,
    pub summary: ReportSummary,
    pub completed_at: String,
}

impl CrawlReport {
    /// Builds the report from the pages collected during one crawl
    ///
    /// `crawled_urls` is the fetch order, already deduplicated by the
    /// frontier.
    pub fn build(
        task_id: String,
        pages: Vec<PageRecord>,
        crawled_urls: Vec<String>,
        depth_reached: u32,
    ) -> Self {
        let summary = summarize(&pages);
        Self {
            task_id,
            total_pages: pages.len(),
            crawled_urls,
            pages,
            depth_reached,
            summary,
            completed_at: Utc::now().to_rfc3339(),
        }
    }
}

fn summarize(pages: &[PageRecord]) -> ReportSummary {
    let mut domains: HashSet<String> = HashSet::new();
    let mut total_words = 0;
    let mut total_images = 0;
    let mut total_links = 0;
    let mut total_bytes = 0usize;

    for page in pages {
        if let Ok(parsed) = url::Url::parse(&page.url) {
            if let Some(host) = parsed.host_str() {
                domains.insert(host.to_ascii_lowercase());
            }
        }
        if let Some(quality) = &page.content_quality {
            total_words += quality.word_count;
        }
        total_images += page.images.len();
        total_links += page.links.len();
        total_bytes += page.content_length;
    }

    let average_page_size = if pages.is_empty() {
        0.0
    } else {
        total_bytes as f64 / pages.len() as f64
    };

    ReportSummary {
        total_words,
        total_images,
        total_links,
        distinct_domains: domains.len(),
        average_page_size,
    }
}

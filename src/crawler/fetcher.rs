//! HTTP fetcher
//!
//! One GET per page with a fixed identity header and a per-request timeout.
//! Every failure is classified into a short message that lands on the page
//! record; fetch failures never abort the crawl.

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;

/// Identity header sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its decoded body
    Success {
        status_code: u16,
        body: String,
        /// Response size in bytes, before text decoding
        content_length: usize,
    },

    /// Anything else: timeout, connection failure, or non-2xx status
    Failure {
        status_code: Option<u16>,
        message: String,
    },
}

/// Builds the HTTP client for one task execution
///
/// Clients are constructed per task and passed down explicitly; there is no
/// shared process-wide client.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one URL and classifies the outcome
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    tracing::debug!("Fetching {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let message = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                format!("Request error: {}", e)
            };
            tracing::debug!("Fetch failed for {}: {}", url, message);
            return FetchOutcome::Failure {
                status_code: None,
                message,
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failure {
            status_code: Some(status.as_u16()),
            message: format!("HTTP status {}", status.as_u16()),
        };
    }

    match response.bytes().await {
        Ok(bytes) => {
            let content_length = bytes.len();
            let body = String::from_utf8_lossy(&bytes).into_owned();
            FetchOutcome::Success {
                status_code: status.as_u16(),
                body,
                content_length,
            }
        }
        Err(e) => {
            let message = if e.is_timeout() {
                "Request timeout".to_string()
            } else {
                format!("Failed to read body: {}", e)
            };
            FetchOutcome::Failure {
                status_code: Some(status.as_u16()),
                message,
            }
        }
    }
}

use serde::Deserialize;

/// Main configuration structure for the crawl service
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Default traversal depth when a task does not specify one
    #[serde(rename = "default-depth", default = "default_depth")]
    pub default_depth: u32,

    /// Default page budget when a task does not specify one
    #[serde(rename = "default-max-pages", default = "default_max_pages")]
    pub default_max_pages: u32,

    /// Per-fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Mandatory pause after every fetch (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// Number of whole-task retries after a failed attempt
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Delay between whole-task retry attempts (seconds)
    #[serde(rename = "retry-delay-secs", default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite task database
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_depth() -> u32 {
    1
}

fn default_max_pages() -> u32 {
    10
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_request_delay() -> u64 {
    1000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    60
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            default_max_pages: default_max_pages(),
            fetch_timeout_secs: default_fetch_timeout(),
            request_delay_ms: default_request_delay(),
            retry_attempts: default_retry_attempts(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

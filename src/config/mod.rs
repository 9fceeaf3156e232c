//! Configuration loading and validation
//!
//! Configuration is a TOML file with crawler defaults and the task store
//! location. The file's SHA-256 hash is recorded for provenance.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig};
pub use validation::validate;

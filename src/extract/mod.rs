//! HTML parsing and structural extraction
//!
//! `document` wraps the parse-once page handle; `content` pulls the capped
//! structural fields out of it.

pub mod content;
pub mod document;

pub use content::{extract_content, Heading, PageContent, PageLink};
pub use document::PageDocument;

//! Structural content extraction
//!
//! Pulls the per-page structural fields (title, description, headings,
//! paragraphs, links, images) out of a parsed document. All caps are hard
//! stops: extraction halts the moment a cap is reached.

use crate::extract::document::{element_text, selector, PageDocument};
use crate::url::is_same_host;
use serde::{Deserialize, Serialize};

/// Maximum number of headings extracted per page
pub const MAX_HEADINGS: usize = 10;

/// Maximum number of paragraphs extracted per page
pub const MAX_PARAGRAPHS: usize = 5;

/// Paragraphs at or below this trimmed length are skipped
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Maximum number of links extracted per page
pub const MAX_LINKS: usize = 20;

/// Link text is clamped to this many characters
pub const MAX_LINK_TEXT_CHARS: usize = 100;

/// Maximum number of images extracted per page
pub const MAX_IMAGES: usize = 50;

/// Sentinel title for pages without a `<title>` element
pub const NO_TITLE: &str = "No title";

/// A heading with its level (1-3)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// An anchor with resolved absolute URL and internal/external tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub url: String,
    pub text: String,
    pub internal: bool,
}

/// Structural fields extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub description: String,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub links: Vec<PageLink>,
    pub images: Vec<String>,
}

/// Extracts all structural fields from a parsed document
///
/// Pure function of the document: re-running on the same parsed bytes
/// yields identical output.
pub fn extract_content(doc: &PageDocument) -> PageContent {
    PageContent {
        title: extract_title(doc),
        description: extract_description(doc),
        headings: extract_headings(doc),
        paragraphs: extract_paragraphs(doc),
        links: extract_links(doc),
        images: extract_images(doc),
    }
}

/// Extracts the page title, or the documented sentinel when absent
fn extract_title(doc: &PageDocument) -> String {
    selector("title")
        .and_then(|sel| doc.html().select(&sel).next().map(|el| element_text(&el)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Extracts the meta description content, or "" when absent
fn extract_description(doc: &PageDocument) -> String {
    selector(r#"meta[name="description"]"#)
        .and_then(|sel| doc.html().select(&sel).next())
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Extracts the first 10 headings at levels 1-3, in document order
///
/// Levels 4-6 are excluded by design.
fn extract_headings(doc: &PageDocument) -> Vec<Heading> {
    let mut headings = Vec::new();

    let Some(sel) = selector("h1, h2, h3") else {
        return headings;
    };

    for element in doc.html().select(&sel) {
        let level = match element.value().name() {
            "h1" => 1,
            "h2" => 2,
            _ => 3,
        };
        headings.push(Heading {
            level,
            text: element_text(&element),
        });
        if headings.len() >= MAX_HEADINGS {
            break;
        }
    }

    headings
}

/// Extracts the first 5 paragraphs whose trimmed text exceeds 20 characters
///
/// Shorter paragraphs are skipped, not counted against the cap.
fn extract_paragraphs(doc: &PageDocument) -> Vec<String> {
    let mut paragraphs = Vec::new();

    let Some(sel) = selector("p") else {
        return paragraphs;
    };

    for element in doc.html().select(&sel) {
        let text = element_text(&element);
        if text.chars().count() > MIN_PARAGRAPH_CHARS {
            paragraphs.push(text);
            if paragraphs.len() >= MAX_PARAGRAPHS {
                break;
            }
        }
    }

    paragraphs
}

/// Extracts the first 20 anchors carrying both an href and non-empty text
///
/// Hrefs are resolved to absolute URLs against the page URL; only http and
/// https results are retained. A link is `internal` when it stays on the
/// page's origin (same host and port).
fn extract_links(doc: &PageDocument) -> Vec<PageLink> {
    let mut links = Vec::new();

    let Some(sel) = selector("a[href]") else {
        return links;
    };

    for element in doc.html().select(&sel) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text = element_text(&element);
        if text.is_empty() {
            continue;
        }
        let Some(resolved) = doc.resolve_link(href) else {
            continue;
        };

        let internal = is_same_host(&resolved, doc.url());

        links.push(PageLink {
            url: resolved.to_string(),
            text: text.chars().take(MAX_LINK_TEXT_CHARS).collect(),
            internal,
        });
        if links.len() >= MAX_LINKS {
            break;
        }
    }

    links
}

/// Extracts image sources resolved to absolute URLs, capped at 50
fn extract_images(doc: &PageDocument) -> Vec<String> {
    let mut images = Vec::new();

    let Some(sel) = selector("img[src]") else {
        return images;
    };

    for element in doc.html().select(&sel) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if let Ok(resolved) = doc.url().join(src.trim()) {
            images.push(resolved.to_string());
            if images.len() >= MAX_IMAGES {
                break;
            }
        }
    }

    images
}

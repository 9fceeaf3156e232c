//! SEO signal extraction
//!
//! Reads the head-level metadata search engines act on: title and
//! description lengths, heading counts, Open Graph tags, JSON-LD blocks,
//! canonical link, robots directive, and document language.

use std::collections::BTreeMap;

use crate::extract::document::{selector, PageDocument};
use serde::{Deserialize, Serialize};

/// SEO signals for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAnalysis {
    pub title_length: usize,
    pub description: String,
    pub description_length: usize,
    pub h1_count: usize,
    pub h2_count: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta_keywords: Option<String>,
    pub og_tags: BTreeMap<String, String>,
    pub json_ld: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lang: Option<String>,
}

/// Derives SEO signals from a parsed document
pub fn analyze_seo(doc: &PageDocument, title: &str, description: &str) -> SeoAnalysis {
    SeoAnalysis {
        title_length: title.chars().count(),
        description: description.to_string(),
        description_length: description.chars().count(),
        h1_count: count_elements(doc, "h1"),
        h2_count: count_elements(doc, "h2"),
        meta_keywords: meta_content(doc, r#"meta[name="keywords"]"#),
        og_tags: extract_og_tags(doc),
        json_ld: extract_json_ld(doc),
        canonical: link_href(doc, r#"link[rel="canonical"]"#),
        robots: meta_content(doc, r#"meta[name="robots"]"#),
        lang: html_lang(doc),
    }
}

fn count_elements(doc: &PageDocument, css: &str) -> usize {
    selector(css)
        .map(|sel| doc.html().select(&sel).count())
        .unwrap_or(0)
}

fn meta_content(doc: &PageDocument, css: &str) -> Option<String> {
    selector(css)
        .and_then(|sel| doc.html().select(&sel).next())
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn link_href(doc: &PageDocument, css: &str) -> Option<String> {
    selector(css)
        .and_then(|sel| doc.html().select(&sel).next())
        .and_then(|el| el.value().attr("href"))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

fn html_lang(doc: &PageDocument) -> Option<String> {
    doc.html()
        .root_element()
        .value()
        .attr("lang")
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

/// Collects `og:*` meta properties into a property -> content map
fn extract_og_tags(doc: &PageDocument) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();

    let Some(sel) = selector("meta[property]") else {
        return tags;
    };

    for element in doc.html().select(&sel) {
        let Some(property) = element.value().attr("property") else {
            continue;
        };
        if !property.starts_with("og:") {
            continue;
        }
        if let Some(content) = element.value().attr("content") {
            tags.entry(property.to_string())
                .or_insert_with(|| content.to_string());
        }
    }

    tags
}

/// Parses JSON-LD script blocks; malformed JSON is skipped, never an error
fn extract_json_ld(doc: &PageDocument) -> Vec<serde_json::Value> {
    let mut blocks = Vec::new();

    let Some(sel) = selector(r#"script[type="application/ld+json"]"#) else {
        return blocks;
    };

    for element in doc.html().select(&sel) {
        let raw = element.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => blocks.push(value),
            Err(_) => {
                tracing::trace!("Skipping malformed JSON-LD block");
            }
        }
    }

    blocks
}

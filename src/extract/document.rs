//! Parsed page document handle
//!
//! HTML is parsed exactly once per page; the resulting `PageDocument` is
//! shared by the structural extractor and every analysis facet. Facets
//! receive it by shared reference and never mutate it.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An immutable parsed page, plus the URL it was fetched from
pub struct PageDocument {
    html: Html,
    url: Url,
}

impl PageDocument {
    /// Parses an HTML body fetched from `url`
    ///
    /// The parser is lenient and never fails; malformed markup produces a
    /// best-effort tree.
    pub fn parse(body: &str, url: &Url) -> Self {
        let html = Html::parse_document(body);
        Self {
            html,
            url: url.clone(),
        }
    }

    /// The parsed document tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The URL this page was fetched from (base for link resolution)
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolves an href against the page URL, keeping only http/https results
    pub fn resolve_link(&self, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        match self.url.join(href) {
            Ok(resolved) if resolved.scheme() == "http" || resolved.scheme() == "https" => {
                Some(resolved)
            }
            _ => None,
        }
    }

    /// Collects the page's visible text
    ///
    /// Walks the tree in document order, skipping script, style, noscript,
    /// and template subtrees. Text nodes are joined with single spaces.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        collect_text(self.html.root_element(), &mut out);
        out
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if matches!(name, "script" | "style" | "noscript" | "template") {
        return;
    }

    for node in element.children() {
        if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(trimmed);
            }
        } else if let Some(child) = ElementRef::wrap(node) {
            collect_text(child, out);
        }
    }
}

/// Returns the joined, trimmed text of an element
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a CSS selector that is known-good at compile time
///
/// Selector strings used by the extractor and analysis facets are fixed
/// literals; a parse failure is a programming error, so this helper keeps
/// call sites on the quiet `Option` path the way the fetch pipeline treats
/// missing elements.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

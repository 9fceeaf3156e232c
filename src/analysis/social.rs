//! Social-media link extraction
//!
//! Scans anchor hrefs for a fixed set of platforms and groups the distinct
//! matches per platform. Platforms with no matches are omitted from the map.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use crate::extract::document::{selector, PageDocument};
use regex::Regex;

/// Platform name paired with its domain pattern, in a fixed order
static PLATFORM_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("facebook", r"(?i)facebook\.com|fb\.com"),
        ("twitter", r"(?i)twitter\.com|(?:^|//|\.)x\.com"),
        ("instagram", r"(?i)instagram\.com"),
        ("linkedin", r"(?i)linkedin\.com"),
        ("youtube", r"(?i)youtube\.com|youtu\.be"),
        ("tiktok", r"(?i)tiktok\.com"),
        ("telegram", r"(?i)t\.me/|telegram\.me|telegram\.org"),
        ("whatsapp", r"(?i)wa\.me/|whatsapp\.com"),
        ("zalo", r"(?i)zalo\.me"),
        ("pinterest", r"(?i)pinterest\.com"),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        (
            name,
            Regex::new(pattern).expect("Failed to compile social media regex"),
        )
    })
    .collect()
});

/// Collects distinct social-media profile links grouped by platform
///
/// Hrefs are matched as written in the markup; each href is attributed to
/// the first platform whose pattern matches it.
pub fn analyze_social(doc: &PageDocument) -> BTreeMap<String, Vec<String>> {
    let mut by_platform: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut seen: HashSet<String> = HashSet::new();

    let Some(sel) = selector("a[href]") else {
        return by_platform;
    };

    for element in doc.html().select(&sel) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || !seen.insert(href.to_string()) {
            continue;
        }

        for (platform, pattern) in PLATFORM_PATTERNS.iter() {
            if pattern.is_match(href) {
                by_platform
                    .entry(platform.to_string())
                    .or_default()
                    .push(href.to_string());
                break;
            }
        }
    }

    by_platform
}

//! Contact extraction
//!
//! Emails and phone numbers pulled from a page's visible text. Matches are
//! distinct and kept in first-seen order.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::extract::document::PageDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("Failed to compile email regex")
});

/// Phone formats, most specific first: leading country code, parenthesised
/// area code, plain separated groups.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\+\d{1,3}[\s.-]?\d{2,4}[\s.-]?\d{3,4}[\s.-]?\d{3,4}",
        r"\(\d{2,4}\)[\s.-]?\d{3,4}[\s.-]?\d{3,4}",
        r"\b0\d{1,3}[\s.-]\d{3,4}[\s.-]\d{3,4}\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Failed to compile phone regex"))
    .collect()
});

/// Contact details found in a page's visible text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Extracts distinct emails and phone numbers from visible text
pub fn analyze_contact(doc: &PageDocument) -> ContactInfo {
    let text = doc.visible_text();

    let mut emails = Vec::new();
    let mut seen_emails = HashSet::new();
    for m in EMAIL_PATTERN.find_iter(&text) {
        let email = m.as_str().to_string();
        if seen_emails.insert(email.to_ascii_lowercase()) {
            emails.push(email);
        }
    }

    let mut phones = Vec::new();
    let mut seen_phones = HashSet::new();
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(&text) {
            let phone = m.as_str().trim().to_string();
            if seen_phones.insert(phone.clone()) {
                phones.push(phone);
            }
        }
    }

    ContactInfo { emails, phones }
}

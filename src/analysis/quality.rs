//! Content-quality metrics
//!
//! Word and element counts, a words-per-sentence readability proxy, and a
//! coarse language guess over the page's visible text.

use crate::extract::document::{selector, PageDocument};
use serde::{Deserialize, Serialize};

/// Characters that only occur in Vietnamese text
const VIETNAMESE_CHARS: &str = "àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩ\
                                òóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ";

/// Visible text needs more than this many diacritic characters to be
/// guessed as Vietnamese
const VIETNAMESE_THRESHOLD: usize = 10;

/// Content-quality metrics for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentQuality {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub image_count: usize,
    pub video_count: usize,
    pub link_count: usize,
    pub readability: f64,
    pub language: String,
}

/// Computes content-quality metrics from a parsed document
pub fn analyze_quality(doc: &PageDocument) -> ContentQuality {
    let text = doc.visible_text();
    let word_count = count_words(&text);
    let sentence_count = count_sentences(&text);

    let readability = if sentence_count == 0 {
        0.0
    } else {
        word_count as f64 / sentence_count as f64
    };

    ContentQuality {
        word_count,
        paragraph_count: count_elements(doc, "p"),
        image_count: count_elements(doc, "img"),
        video_count: count_elements(doc, "video") + count_elements(doc, "iframe"),
        link_count: count_elements(doc, "a"),
        readability,
        language: guess_language(&text).to_string(),
    }
}

fn count_elements(doc: &PageDocument, css: &str) -> usize {
    selector(css)
        .map(|sel| doc.html().select(&sel).count())
        .unwrap_or(0)
}

/// Counts whitespace-separated tokens that contain at least one
/// alphanumeric character
fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(|c| c.is_alphanumeric()))
        .count()
}

/// Counts non-empty sentences, splitting on `.`, `!`, and `?`
fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Guesses the page language from its visible text
///
/// "vietnamese" past the diacritic threshold, "english" on any ASCII
/// letter, "unknown" otherwise.
fn guess_language(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let vietnamese_hits = lowered
        .chars()
        .filter(|c| VIETNAMESE_CHARS.contains(*c))
        .count();

    if vietnamese_hits > VIETNAMESE_THRESHOLD {
        "vietnamese"
    } else if text.chars().any(|c| c.is_ascii_alphabetic()) {
        "english"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn doc(body: &str) -> PageDocument {
        let url = Url::parse("https://example.com/").unwrap();
        PageDocument::parse(body, &url)
    }

    #[test]
    fn test_word_count_skips_bare_punctuation() {
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words("one - two -- three"), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("No terminator"), 1);
        assert_eq!(count_sentences("..."), 0);
    }

    #[test]
    fn test_readability_is_words_per_sentence() {
        let d = doc("<html><body><p>One two three. Four five six.</p></body></html>");
        let quality = analyze_quality(&d);
        assert_eq!(quality.word_count, 6);
        assert!((quality.readability - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_readability_zero_without_sentences() {
        let quality = analyze_quality(&doc("<html><body></body></html>"));
        assert_eq!(quality.readability, 0.0);
    }

    #[test]
    fn test_element_counts() {
        let d = doc(
            r#"<html><body>
            <p>a</p><p>b</p>
            <img src="/1.png"><img src="/2.png"><img src="/3.png">
            <video src="/v.mp4"></video>
            <iframe src="https://player.example.com/x"></iframe>
            <a href="/x">x</a>
            </body></html>"#,
        );
        let quality = analyze_quality(&d);
        assert_eq!(quality.paragraph_count, 2);
        assert_eq!(quality.image_count, 3);
        assert_eq!(quality.video_count, 2);
        assert_eq!(quality.link_count, 1);
    }

    #[test]
    fn test_language_vietnamese() {
        let d = doc("<html><body><p>Chào mừng bạn đến với trang web của chúng tôi, chúc bạn một ngày tốt lành</p></body></html>");
        assert_eq!(analyze_quality(&d).language, "vietnamese");
    }

    #[test]
    fn test_language_english() {
        let d = doc("<html><body><p>Welcome to the site</p></body></html>");
        assert_eq!(analyze_quality(&d).language, "english");
    }

    #[test]
    fn test_language_unknown() {
        let d = doc("<html><body><p>123 456</p></body></html>");
        assert_eq!(analyze_quality(&d).language, "unknown");
    }
}

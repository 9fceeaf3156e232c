//! Per-page analysis facets
//!
//! Every facet is a pure function over the shared parsed document: same
//! bytes in, same analysis out. Facets never mutate the document and never
//! fail; absent signals come back empty.

pub mod contact;
pub mod quality;
pub mod seo;
pub mod social;
pub mod structured;

use std::collections::BTreeMap;

use crate::extract::document::PageDocument;
use serde::{Deserialize, Serialize};

pub use contact::{analyze_contact, ContactInfo};
pub use quality::{analyze_quality, ContentQuality};
pub use seo::{analyze_seo, SeoAnalysis};
pub use social::analyze_social;
pub use structured::{analyze_structured, FormInfo, FormInput, SiteLink, StructuredData, TableInfo};

/// All analysis facets for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub seo: SeoAnalysis,
    pub social_media: BTreeMap<String, Vec<String>>,
    pub contact_info: ContactInfo,
    pub content_quality: ContentQuality,
    pub structured_data: StructuredData,
}

/// Runs every facet over a parsed document
///
/// `title` and `description` come from the structural extractor so the SEO
/// facet reports lengths for exactly the values stored on the record.
pub fn analyze_page(doc: &PageDocument, title: &str, description: &str) -> PageAnalysis {
    PageAnalysis {
        seo: analyze_seo(doc, title, description),
        social_media: analyze_social(doc),
        contact_info: analyze_contact(doc),
        content_quality: analyze_quality(doc),
        structured_data: analyze_structured(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_analysis_is_idempotent() {
        let body = r#"<html lang="vi"><head>
            <title>Shop</title>
            <meta property="og:title" content="Shop">
            </head><body>
            <h1>Welcome</h1>
            <p>Contact us at hello@example.com or call +84 28 3822 9999.</p>
            <a href="https://facebook.com/shop">Facebook</a>
            <footer><a href="/terms">Terms</a></footer>
            </body></html>"#;
        let url = Url::parse("https://example.com/").unwrap();

        let first = analyze_page(&PageDocument::parse(body, &url), "Shop", "");
        let second = analyze_page(&PageDocument::parse(body, &url), "Shop", "");
        assert_eq!(first, second);

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_facets_populated_together() {
        let body = r#"<html><body>
            <p>Reach sales@example.com for a quote on anything you need.</p>
            <a href="https://instagram.com/shop">IG</a>
            </body></html>"#;
        let url = Url::parse("https://example.com/").unwrap();
        let analysis = analyze_page(&PageDocument::parse(body, &url), "T", "D");

        assert_eq!(analysis.seo.title_length, 1);
        assert_eq!(analysis.contact_info.emails, vec!["sales@example.com"]);
        assert!(analysis.social_media.contains_key("instagram"));
        assert_eq!(analysis.content_quality.language, "english");
    }
}

//! Structured page elements
//!
//! Breadcrumbs, navigation and footer links, forms, and tables. Selector
//! fallbacks run in a fixed order so output is stable for a given page.

use crate::extract::document::{element_text, selector, PageDocument};
use serde::{Deserialize, Serialize};

/// Maximum navigation links reported per page
pub const MAX_NAV_LINKS: usize = 20;

/// Maximum footer links reported per page
pub const MAX_FOOTER_LINKS: usize = 15;

/// Maximum tables reported per page
pub const MAX_TABLES: usize = 5;

/// Breadcrumb containers, tried in order; the first selector with a
/// non-empty match wins
const BREADCRUMB_SELECTORS: &[&str] = &[
    r#"nav[aria-label="breadcrumb"] a"#,
    ".breadcrumb a",
    ".breadcrumbs a",
    "ol.breadcrumb li",
    "ul.breadcrumb li",
];

/// Navigation containers, tried in order
const NAV_SELECTORS: &[&str] = &["nav a[href]", ".nav a[href]", ".navbar a[href]", "header a[href]"];

/// A resolved link inside a navigation or footer region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLink {
    pub url: String,
    pub text: String,
}

/// One form with its submittable inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInfo {
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

/// A single form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<String>,
    pub required: bool,
}

/// A table summarised as its header texts and row count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Structured elements found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredData {
    pub breadcrumbs: Vec<String>,
    pub nav_links: Vec<SiteLink>,
    pub footer_links: Vec<SiteLink>,
    pub forms: Vec<FormInfo>,
    pub tables: Vec<TableInfo>,
}

/// Extracts structured elements from a parsed document
pub fn analyze_structured(doc: &PageDocument) -> StructuredData {
    StructuredData {
        breadcrumbs: extract_breadcrumbs(doc),
        nav_links: extract_region_links(doc, NAV_SELECTORS, MAX_NAV_LINKS),
        footer_links: extract_region_links(doc, &["footer a[href]"], MAX_FOOTER_LINKS),
        forms: extract_forms(doc),
        tables: extract_tables(doc),
    }
}

fn extract_breadcrumbs(doc: &PageDocument) -> Vec<String> {
    for css in BREADCRUMB_SELECTORS {
        let Some(sel) = selector(css) else {
            continue;
        };
        let crumbs: Vec<String> = doc
            .html()
            .select(&sel)
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
            .collect();
        if !crumbs.is_empty() {
            return crumbs;
        }
    }
    Vec::new()
}

/// Collects resolved links from the first selector that matches anything
fn extract_region_links(doc: &PageDocument, selectors: &[&str], cap: usize) -> Vec<SiteLink> {
    for css in selectors {
        let Some(sel) = selector(css) else {
            continue;
        };

        let mut links = Vec::new();
        for element in doc.html().select(&sel) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(resolved) = doc.resolve_link(href) else {
                continue;
            };
            links.push(SiteLink {
                url: resolved.to_string(),
                text: element_text(&element),
            });
            if links.len() >= cap {
                break;
            }
        }
        if !links.is_empty() {
            return links;
        }
    }
    Vec::new()
}

fn extract_forms(doc: &PageDocument) -> Vec<FormInfo> {
    let mut forms = Vec::new();

    let Some(form_sel) = selector("form") else {
        return forms;
    };
    let Some(input_sel) = selector("input, textarea, select") else {
        return forms;
    };

    for form in doc.html().select(&form_sel) {
        let action = form.value().attr("action").unwrap_or_default().to_string();
        let method = form
            .value()
            .attr("method")
            .unwrap_or("get")
            .to_ascii_lowercase();

        let inputs = form
            .select(&input_sel)
            .map(|input| FormInput {
                input_type: input
                    .value()
                    .attr("type")
                    .unwrap_or_else(|| match input.value().name() {
                        "textarea" => "textarea",
                        "select" => "select",
                        _ => "text",
                    })
                    .to_string(),
                name: input.value().attr("name").map(|n| n.to_string()),
                placeholder: input.value().attr("placeholder").map(|p| p.to_string()),
                required: input.value().attr("required").is_some(),
            })
            .collect();

        forms.push(FormInfo {
            action,
            method,
            inputs,
        });
    }

    forms
}

fn extract_tables(doc: &PageDocument) -> Vec<TableInfo> {
    let mut tables = Vec::new();

    let Some(table_sel) = selector("table") else {
        return tables;
    };
    let Some(th_sel) = selector("th") else {
        return tables;
    };
    let Some(tr_sel) = selector("tr") else {
        return tables;
    };

    for table in doc.html().select(&table_sel) {
        tables.push(TableInfo {
            headers: table.select(&th_sel).map(|th| element_text(&th)).collect(),
            row_count: table.select(&tr_sel).count(),
        });
        if tables.len() >= MAX_TABLES {
            break;
        }
    }

    tables
}

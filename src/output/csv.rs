//! CSV export of a completed crawl
//!
//! Writes one row per page with RFC 4180 quoting. Column set and the
//! description/heading truncation match what downstream spreadsheet
//! consumers already expect.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::crawler::CrawlReport;
use crate::Result;

const HEADER: &[&str] = &[
    "URL",
    "Title",
    "Description",
    "Headings",
    "Paragraph_Count",
    "Link_Count",
    "Image_Count",
];

/// Description cells longer than this are truncated with an ellipsis
const MAX_DESCRIPTION_CHARS: usize = 100;

/// Heading cells are clamped to this many characters
const MAX_HEADINGS_CHARS: usize = 200;

/// Renders a report as CSV text
pub fn report_to_csv(report: &CrawlReport) -> String {
    let mut out = String::new();
    write_row(&mut out, HEADER.iter().map(|s| s.to_string()));

    for page in &report.pages {
        let description = if page.description.chars().count() > MAX_DESCRIPTION_CHARS {
            let truncated: String = page.description.chars().take(MAX_DESCRIPTION_CHARS).collect();
            format!("{}...", truncated)
        } else {
            page.description.clone()
        };

        let headings: String = page
            .headings
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
            .chars()
            .take(MAX_HEADINGS_CHARS)
            .collect();

        write_row(
            &mut out,
            [
                page.url.clone(),
                page.title.clone(),
                description,
                headings,
                page.paragraphs.len().to_string(),
                page.links.len().to_string(),
                page.images.len().to_string(),
            ]
            .into_iter(),
        );
    }

    out
}

/// Writes a report to a CSV file
pub fn export_csv(report: &CrawlReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(report_to_csv(report).as_bytes())?;
    writer.flush()?;

    tracing::info!("Exported {} pages to {}", report.total_pages, path.display());
    Ok(())
}

fn write_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape_field(&field));
    }
    out.push_str("\r\n");
}

/// Quotes a field when it contains a comma, quote, or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

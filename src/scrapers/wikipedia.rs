//! Wikipedia storm-season page scraper.
//!
//! Season articles (e.g. the 1975 Pacific hurricane season) give each storm a
//! level-3 section: a `div.mw-heading.mw-heading3` wrapper holding the `h3`,
//! followed by the storm's description paragraphs as sibling `p` elements.
//! This module fetches the page and turns each such section into a
//! [`StormRecord`].

use crate::models::StormRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::get;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

// Selector strings are compile-time constants, so parse cannot fail.
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-body-content").unwrap());

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-heading.mw-heading3").unwrap());

static H3_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());

static CITATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Fetch the season page and return its raw HTML.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_page(url: &str) -> Result<String, Box<dyn Error>> {
    let html = get(url).await?.text().await?;
    info!(bytes = html.len(), "Fetched season page");
    Ok(html)
}

/// Clean scraped text: strip `[...]` citation markers, normalize non-breaking
/// spaces, collapse whitespace runs, trim.
pub fn clean_text(text: &str) -> String {
    let text = CITATION_RE.replace_all(text, "");
    let text = text.replace('\u{a0}', " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Extract one [`StormRecord`] per level-3 section heading in the body
/// content region.
///
/// For each heading wrapper, skips forward over sibling elements to the first
/// `p` and collects the contiguous run of `p` siblings from there; the first
/// non-`p` element after a paragraph ends the run. Heading wrappers without an
/// `h3` child and headings with no following paragraphs are dropped.
#[instrument(level = "info", skip_all)]
pub fn extract_storm_records(html: &str) -> Vec<StormRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        debug!("No body content region found in document");
        return records;
    };

    for heading in body.select(&HEADING_SELECTOR) {
        let Some(h3) = heading.select(&H3_SELECTOR).next() else {
            continue;
        };
        let storm_name = clean_text(&h3.text().collect::<Vec<_>>().join(" "));
        let content = collect_paragraphs(heading);

        if content.is_empty() {
            debug!(%storm_name, "Heading has no paragraphs; dropping");
            continue;
        }

        debug!(%storm_name, paragraphs = content.len(), "Extracted storm section");
        records.push(StormRecord { storm_name, content });
    }

    info!(count = records.len(), "Extracted storm records");
    records
}

/// Collect the run of `p` siblings following a heading wrapper.
fn collect_paragraphs(heading: ElementRef<'_>) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut in_run = false;

    let mut node = heading.next_sibling();
    while let Some(n) = node {
        if let Some(element) = ElementRef::wrap(n) {
            if element.value().name() == "p" {
                paragraphs.push(clean_text(&element.text().collect::<String>()));
                in_run = true;
            } else if in_run {
                break;
            }
            // Elements before the first paragraph (infoboxes, figures) are
            // skipped; only a non-p element after a paragraph ends the run.
        }
        node = n.next_sibling();
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!(
            "<html><body><div class=\"mw-body-content\">{body}</div></body></html>"
        )
    }

    #[test]
    fn test_clean_text_strips_citations() {
        assert_eq!(clean_text("Hurricane Olivia[3] struck[a] land."), "Hurricane Olivia struck land.");
    }

    #[test]
    fn test_clean_text_normalizes_whitespace() {
        assert_eq!(clean_text("  a\u{a0}b \n\t c  "), "a b c");
    }

    #[test]
    fn test_single_heading_with_two_paragraphs() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><h3>Hurricane Test</h3></div>
               <p>First paragraph.</p>
               <p>Second paragraph.</p>
               <h2>Next section</h2>"#,
        );

        let records = extract_storm_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].storm_name, "Hurricane Test");
        assert_eq!(
            records[0].content,
            vec!["First paragraph.".to_string(), "Second paragraph.".to_string()]
        );
    }

    #[test]
    fn test_run_stops_at_non_paragraph_element() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><h3>Hurricane A</h3></div>
               <p>Kept.</p>
               <table><tr><td>stats</td></tr></table>
               <p>Not kept.</p>"#,
        );

        let records = extract_storm_records(&html);
        assert_eq!(records[0].content, vec!["Kept.".to_string()]);
    }

    #[test]
    fn test_elements_before_first_paragraph_are_skipped() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><h3>Hurricane B</h3></div>
               <figure>track map</figure>
               <p>Description.</p>"#,
        );

        let records = extract_storm_records(&html);
        assert_eq!(records[0].content, vec!["Description.".to_string()]);
    }

    #[test]
    fn test_heading_without_paragraphs_is_dropped() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><h3>Empty Section</h3></div>
               <h2>Other</h2>
               <div class="mw-heading mw-heading3"><h3>Hurricane C</h3></div>
               <p>Text.</p>"#,
        );

        let records = extract_storm_records(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].storm_name, "Hurricane C");
    }

    #[test]
    fn test_wrapper_without_h3_is_skipped() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><span>no heading</span></div>
               <p>Orphan text.</p>"#,
        );

        assert!(extract_storm_records(&html).is_empty());
    }

    #[test]
    fn test_citations_cleaned_from_name_and_paragraphs() {
        let html = page(
            r#"<div class="mw-heading mw-heading3"><h3>Hurricane D[1]</h3></div>
               <p>Made landfall.[2][3]</p>"#,
        );

        let records = extract_storm_records(&html);
        assert_eq!(records[0].storm_name, "Hurricane D");
        assert_eq!(records[0].content, vec!["Made landfall.".to_string()]);
    }

    #[test]
    fn test_no_body_content_region() {
        let html = "<html><body><p>bare page</p></body></html>";
        assert!(extract_storm_records(html).is_empty());
    }
}

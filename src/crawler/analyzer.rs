//! Page analyzer: SEO field and link extraction
//!
//! Every extraction is independent and tolerant of absent or malformed
//! markup; a missing element yields an empty string, never an error.

use crate::crawler::politeness::PolitenessController;
use crate::storage::PageRecord;
use crate::url::normalize_parsed;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed HTML document ready for extraction
///
/// Parsing happens once; both the record and the links are read from the
/// same tree.
pub struct ParsedPage {
    document: Html,
}

impl ParsedPage {
    /// Parses HTML content; malformed markup is repaired, never rejected
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Builds the page record for `url` with the extracted SEO fields
    pub fn record(&self, url: &str, status: u16) -> PageRecord {
        PageRecord {
            title: self.title(),
            description: self.meta_content("description"),
            h1: self.first_h1(),
            canonical: self.canonical(),
            meta_robots: self.meta_content("robots"),
            ..PageRecord::new(url, status)
        }
    }

    /// Returns the normalized absolute HTTP(S) URL of every anchor, in document order
    ///
    /// Duplicates are kept.
    pub fn links(&self, base_url: &Url) -> Vec<String> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        self.document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_link(href, base_url))
            .collect()
    }

    /// First `<title>` element's trimmed text
    fn title(&self) -> String {
        self.first("title")
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// Visible text of the first `<h1>`, whitespace collapsed
    fn first_h1(&self) -> String {
        self.first("h1")
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// `content` of the first `<meta name="...">` with the given name
    fn meta_content(&self, name: &str) -> String {
        let Ok(selector) = Selector::parse("meta[name]") else {
            return String::new();
        };

        self.document
            .select(&selector)
            .find(|element| {
                element
                    .value()
                    .attr("name")
                    .is_some_and(|value| value.trim().eq_ignore_ascii_case(name))
            })
            .and_then(|element| element.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    /// `href` of the first `<link rel="canonical">`, as written in the page
    fn canonical(&self) -> String {
        let Ok(selector) = Selector::parse("link[rel]") else {
            return String::new();
        };

        self.document
            .select(&selector)
            .find(|element| {
                element.value().attr("rel").is_some_and(|rel| {
                    rel.split_whitespace()
                        .any(|token| token.eq_ignore_ascii_case("canonical"))
                })
            })
            .and_then(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .unwrap_or_default()
    }

    fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }
}

/// Extracts the SEO record for a fetched page
pub fn analyze(url: &str, status: u16, html: &str) -> PageRecord {
    ParsedPage::parse(html).record(url, status)
}

/// Extracts outbound links the politeness controller allows, in document order
pub fn extract_links(html: &str, base_url: &Url, politeness: &PolitenessController) -> Vec<String> {
    ParsedPage::parse(html)
        .links(base_url)
        .into_iter()
        .filter(|link| politeness.can_fetch(link))
        .collect()
}

/// Resolves an href to a normalized absolute HTTP(S) URL
///
/// Returns None for empty and fragment-only hrefs, unresolvable values,
/// and schemes other than http and https (`mailto:`, `javascript:`, ...).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_parsed(absolute).ok()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

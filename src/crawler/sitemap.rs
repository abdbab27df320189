//! Sitemap seeding
//!
//! Reads `/sitemap.xml` relative to the base URL and returns the text of
//! every `<loc>` element. Nested sitemap indexes are not followed. Loading
//! is best-effort: [`load_sitemap`] returns an empty list on any failure.

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Reasons a sitemap could not be used
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to build sitemap URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to fetch sitemap: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sitemap returned HTTP {0}")]
    Status(u16),

    #[error("Malformed sitemap XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Truncated sitemap XML: {0} element(s) left open")]
    Truncated(usize),
}

/// Extracts every `<loc>` value from sitemap XML, in document order
///
/// Any XML error rejects the whole document, so a malformed sitemap
/// contributes no URLs rather than a partial list.
pub fn parse_sitemap(xml: &[u8]) -> Result<Vec<String>, SitemapError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut locs = Vec::new();
    let mut open_elements = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                open_elements += 1;
                if e.local_name().as_ref() == b"loc" {
                    current = Some(String::new());
                }
            }
            Event::End(e) => {
                open_elements = open_elements.saturating_sub(1);
                if e.local_name().as_ref() == b"loc" {
                    if let Some(loc) = current.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            locs.push(loc.to_string());
                        }
                    }
                }
            }
            Event::Text(text) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof if open_elements > 0 => {
                return Err(SitemapError::Truncated(open_elements));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(locs)
}

/// Fetches and parses `/sitemap.xml` relative to the base URL
pub async fn fetch_sitemap(client: &Client, base_url: &Url) -> Result<Vec<String>, SitemapError> {
    let url = base_url.join("/sitemap.xml")?;
    let response = client.get(url).send().await?;

    if response.status() != StatusCode::OK {
        return Err(SitemapError::Status(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    parse_sitemap(&body)
}

/// Loads sitemap URLs, returning an empty list on any failure
pub async fn load_sitemap(client: &Client, base_url: &Url) -> Vec<String> {
    match fetch_sitemap(client, base_url).await {
        Ok(locs) => {
            tracing::info!("Sitemap provided {} URLs", locs.len());
            locs
        }
        Err(e) => {
            tracing::debug!("No sitemap seeds for {}: {}", base_url, e);
            Vec::new()
        }
    }
}

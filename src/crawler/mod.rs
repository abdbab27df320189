//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with transport failure classification
//! - HTML analysis for SEO fields and outbound links
//! - Host scoping, robots.txt rules and request pacing
//! - Sitemap seeding and the breadth-first frontier
//! - The crawl session that ties them together

mod analyzer;
mod fetcher;
mod frontier;
mod politeness;
mod session;
mod sitemap;

pub use analyzer::{analyze, extract_links, ParsedPage};
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage};
pub use frontier::{Frontier, FrontierEntry};
pub use politeness::{PolitenessController, RateGate};
pub use session::{CrawlSession, ProgressObserver, SessionStats};
pub use sitemap::{fetch_sitemap, load_sitemap, parse_sitemap, SitemapError};

use crate::config::CrawlConfig;
use crate::SeoError;

/// Runs a complete crawl and writes the final export
///
/// This is the simplest entry point: it will
/// 1. Load robots.txt and sitemap seeds
/// 2. Crawl breadth-first within the configured bounds
/// 3. Export results to the configured output directory
///
/// # Returns
///
/// * `Ok(CrawlSession)` - The finished session, for statistics or further export
/// * `Err(SeoError)` - Invalid configuration or export failure
pub async fn crawl(config: CrawlConfig) -> Result<CrawlSession, SeoError> {
    let mut session = CrawlSession::new(config)?;
    session.crawl().await?;
    session.export_default()?;
    Ok(session)
}

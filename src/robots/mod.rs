//! Robots.txt handling module
//!
//! This module provides functionality for fetching and parsing the base site's
//! robots.txt. Loading is best-effort: [`load_robots`] never fails, it falls
//! back to an allow-all policy whenever the file cannot be used.

mod parser;

pub use parser::{ParsedRobots, ROBOTS_AGENT};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Reasons a robots.txt could not be used
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Failed to build robots.txt URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to fetch robots.txt: {0}")]
    Http(#[from] reqwest::Error),

    #[error("robots.txt returned HTTP {0}")]
    Status(u16),
}

/// Returns the robots.txt location for a base URL
pub fn robots_url(base_url: &Url) -> Result<Url, url::ParseError> {
    base_url.join("/robots.txt")
}

/// Fetches and parses robots.txt relative to the base URL
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - The file was served with HTTP 200
/// * `Err(RobotsError)` - Network failure or any other status
pub async fn fetch_robots(client: &Client, base_url: &Url) -> Result<ParsedRobots, RobotsError> {
    let url = robots_url(base_url)?;
    let response = client.get(url).send().await?;

    if response.status() != StatusCode::OK {
        return Err(RobotsError::Status(response.status().as_u16()));
    }

    let body = response.text().await?;
    Ok(ParsedRobots::from_content(&body))
}

/// Loads robots.txt, falling back to allow-all on any failure
pub async fn load_robots(client: &Client, base_url: &Url) -> ParsedRobots {
    match fetch_robots(client, base_url).await {
        Ok(robots) => {
            tracing::debug!("Loaded robots.txt for {}", base_url);
            robots
        }
        Err(e) => {
            tracing::warn!("{} ({}); allowing all paths", e, base_url);
            ParsedRobots::allow_all()
        }
    }
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent and timeouts
//! - GET requests for page content with lossy body decoding
//! - Classifying transport failures into a uniform error

use crate::config::{HttpConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A response received for a page request
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub final_url: String,
    /// Decoded body; undecodable bytes are replaced, never rejected
    pub body: String,
}

/// Transport-level failure: no usable response was received
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl FetchError {
    fn from_send(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }

    fn from_body(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Body(error.to_string())
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy (up to 10 hops); the
/// status recorded for a page is the status of the final response.
///
/// # Example
///
/// ```no_run
/// use seo_ripple::config::{HttpConfig, UserAgentConfig};
/// use seo_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// Every HTTP status is a successful fetch here; judging the status is the
/// caller's job. Only failures that leave no response (DNS, connect, timeout,
/// broken body) are errors.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::from_send)?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    // text() decodes using the response charset and replaces malformed sequences
    let body = response.text().await.map_err(FetchError::from_body)?;

    Ok(FetchedPage {
        status,
        final_url,
        body,
    })
}

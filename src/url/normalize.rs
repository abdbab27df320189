use crate::UrlError;
use url::Url;

/// Normalizes a URL according to Seo-Ripple's normalization rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything but http:// and https://
/// 3. Require a host (the parser lowercases it and drops default ports)
/// 4. Remove fragment (everything after #)
/// 5. Render a bare root path without its trailing slash
///
/// The returned string is the URL's identity for deduplication and the
/// value recorded in exports.
///
/// # Examples
///
/// ```
/// use seo_ripple::url::normalize_url;
///
/// let url = normalize_url("HTTPS://Example.COM:443/#top").unwrap();
/// assert_eq!(url, "https://example.com");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already parsed URL; see [`normalize_url`]
pub fn normalize_parsed(mut url: Url) -> Result<String, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    let mut rendered = url.to_string();
    if url.path() == "/" && url.query().is_none() {
        rendered.pop();
    }

    Ok(rendered)
}

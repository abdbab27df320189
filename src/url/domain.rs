use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_ripple::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether `candidate` is within the crawl scope of `base_host`
///
/// Hosts are compared case-insensitively. Without subdomains only the exact
/// base host matches; with subdomains the base host and any host ending in
/// `.base_host` match.
///
/// ```
/// use seo_ripple::url::host_in_scope;
///
/// assert!(host_in_scope("example.com", "EXAMPLE.com", false));
/// assert!(!host_in_scope("example.com", "blog.example.com", false));
/// assert!(host_in_scope("example.com", "blog.example.com", true));
/// assert!(!host_in_scope("example.com", "badexample.com", true));
/// ```
pub fn host_in_scope(base_host: &str, candidate: &str, include_subdomains: bool) -> bool {
    let base = base_host.to_lowercase();
    let candidate = candidate.to_lowercase();

    if candidate == base {
        return true;
    }

    include_subdomains && candidate.ends_with(&format!(".{}", base))
}

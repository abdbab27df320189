use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Longest accepted pacing interval, in seconds (one day)
///
/// Applies to `rate-limit-seconds` and to robots.txt `Crawl-delay`.
pub const MAX_RATE_LIMIT_SECONDS: f64 = 86_400.0;

/// Main configuration structure for Seo-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The URL the crawl starts from; also defines the in-scope host
    #[serde(rename = "base-url")]
    pub base_url: String,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl CrawlConfig {
    /// Creates a configuration for `base_url` with every other setting defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link distance from the base URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of fetch attempts recorded in a session
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Whether subdomains of the base host are in scope
    #[serde(rename = "include-subdomains", default)]
    pub include_subdomains: bool,

    /// Minimum time between the start of two consecutive fetches (seconds)
    #[serde(rename = "rate-limit-seconds", default = "default_rate_limit")]
    pub rate_limit_seconds: f64,

    /// Write an autosave snapshot every this many completed attempts
    #[serde(rename = "autosave-interval", default = "default_autosave_interval")]
    pub autosave_interval: usize,
}

impl CrawlerConfig {
    /// Returns the configured pacing interval as a `Duration`
    ///
    /// Values are clamped to `0..=MAX_RATE_LIMIT_SECONDS`; NaN means no pacing.
    pub fn rate_limit(&self) -> Duration {
        let seconds = self.rate_limit_seconds.clamp(0.0, MAX_RATE_LIMIT_SECONDS);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            include_subdomains: false,
            rate_limit_seconds: default_rate_limit(),
            autosave_interval: default_autosave_interval(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// Optional URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory all export files are written to
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Basename of the final export files
    #[serde(default = "default_basename")]
    pub basename: String,

    /// Basename of the autosave snapshot files (overwritten each time)
    #[serde(rename = "autosave-basename", default = "default_autosave_basename")]
    pub autosave_basename: String,
}

impl OutputConfig {
    /// Path prefix for the final export, e.g. `./results`
    pub fn export_base(&self) -> PathBuf {
        self.directory.join(&self.basename)
    }

    /// Path prefix for autosave snapshots, e.g. `./autosave`
    pub fn autosave_base(&self) -> PathBuf {
        self.directory.join(&self.autosave_basename)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            basename: default_basename(),
            autosave_basename: default_autosave_basename(),
        }
    }
}

/// HTTP client timeouts
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_pages() -> usize {
    100
}

fn default_rate_limit() -> f64 {
    1.0
}

fn default_autosave_interval() -> usize {
    50
}

fn default_crawler_name() -> String {
    "SeoRipple".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_basename() -> String {
    "results".to_string()
}

fn default_autosave_basename() -> String {
    "autosave".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

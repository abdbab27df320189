//! Politeness controller: host scope, robots.txt rules and request pacing
//!
//! The controller answers "may this URL ever be fetched?" via
//! [`PolitenessController::can_fetch`] and "may a fetch start now?" via
//! [`PolitenessController::wait_turn`].

use crate::config::MAX_RATE_LIMIT_SECONDS;
use crate::robots::{load_robots, ParsedRobots};
use crate::url::{extract_domain, host_in_scope};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// Enforces a minimum interval between the start of consecutive fetches
///
/// The gate holds a single "last request" instant behind an async mutex.
/// The lock is kept across the wait, so any number of holders of a shared
/// `Arc<RateGate>` acquire turns strictly one after another.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Returns the minimum interval between fetch starts
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a fetch may start, then records the start time
    ///
    /// The first call never waits.
    pub async fn wait_turn(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let ready_at = previous + self.interval;
            if Instant::now() < ready_at {
                tracing::trace!("Rate gate waiting {:?}", ready_at - Instant::now());
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

/// Gates and paces outbound requests for one crawl session
#[derive(Debug, Clone)]
pub struct PolitenessController {
    base_host: String,
    include_subdomains: bool,
    robots: ParsedRobots,
    rate_gate: Arc<RateGate>,
}

impl PolitenessController {
    /// Creates a controller with an allow-all robots policy
    ///
    /// # Arguments
    ///
    /// * `base_url` - The crawl's base URL; its host defines the scope
    /// * `include_subdomains` - Whether subdomains of the base host are in scope
    /// * `rate_limit` - Minimum time between fetch starts
    pub fn new(base_url: &Url, include_subdomains: bool, rate_limit: Duration) -> Self {
        Self {
            base_host: extract_domain(base_url).unwrap_or_default(),
            include_subdomains,
            robots: ParsedRobots::allow_all(),
            rate_gate: Arc::new(RateGate::new(rate_limit)),
        }
    }

    /// Loads robots.txt for the base URL, falling back to allow-all
    ///
    /// A `Crawl-delay` for `*` longer than the configured rate limit raises
    /// the pacing interval. Must run before the first [`wait_turn`](Self::wait_turn).
    pub async fn load_robots(&mut self, client: &Client, base_url: &Url) {
        let robots = load_robots(client, base_url).await;
        if robots.is_allow_all() {
            tracing::info!("No robots.txt rules apply; every in-scope path is allowed");
        }
        self.set_robots(robots);
    }

    /// Replaces the robots ruleset and applies its crawl delay
    pub fn set_robots(&mut self, robots: ParsedRobots) {
        if let Some(delay) = robots.crawl_delay().and_then(crawl_delay_interval) {
            if delay > self.rate_gate.interval() {
                tracing::info!("robots.txt Crawl-delay raises request interval to {:?}", delay);
                self.rate_gate = Arc::new(RateGate::new(delay));
            }
        }
        self.robots = robots;
    }

    /// Checks whether a URL may be fetched at all
    ///
    /// Returns false for unparseable URLs, hosts outside the crawl scope,
    /// and paths robots.txt disallows for user agent `*`.
    pub fn can_fetch(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        let in_scope = extract_domain(&parsed)
            .map(|host| host_in_scope(&self.base_host, &host, self.include_subdomains))
            .unwrap_or(false);
        if !in_scope {
            return false;
        }

        self.robots.is_allowed(url)
    }

    /// Waits for this session's turn to start a fetch
    pub async fn wait_turn(&self) {
        self.rate_gate.wait_turn().await;
    }

    /// Returns the shared rate gate
    pub fn rate_gate(&self) -> Arc<RateGate> {
        Arc::clone(&self.rate_gate)
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    pub fn robots(&self) -> &ParsedRobots {
        &self.robots
    }
}

/// Converts a robots.txt `Crawl-delay` to an interval
///
/// Delays above [`MAX_RATE_LIMIT_SECONDS`] are capped; negative or NaN
/// delays are ignored.
fn crawl_delay_interval(seconds: f64) -> Option<Duration> {
    let capped = if seconds > MAX_RATE_LIMIT_SECONDS {
        tracing::warn!(
            "robots.txt Crawl-delay {} exceeds {}s; capping",
            seconds,
            MAX_RATE_LIMIT_SECONDS
        );
        MAX_RATE_LIMIT_SECONDS
    } else {
        seconds
    };

    match Duration::try_from_secs_f64(capped) {
        Ok(delay) => Some(delay),
        Err(_) => {
            tracing::warn!("Ignoring invalid robots.txt Crawl-delay {}", seconds);
            None
        }
    }
}

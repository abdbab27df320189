//! Robots.txt rules for the `*` user agent
//!
//! Path matching is delegated to the robotstxt crate; only the
//! `Crawl-delay` extension, which that crate ignores, is read here.

use robotstxt::DefaultMatcher;

/// The user agent robots rules are evaluated for
pub const ROBOTS_AGENT: &str = "*";

/// A loaded robots.txt ruleset
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt body; None for the allow-all fallback
    rules: Option<String>,
    /// `Crawl-delay` of the `*` group, in seconds
    crawl_delay: Option<f64>,
}

impl ParsedRobots {
    /// Builds a ruleset from a robots.txt body
    ///
    /// Unparseable lines are ignored, so any text is accepted.
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: Some(content.to_string()),
            crawl_delay: wildcard_crawl_delay(content),
        }
    }

    /// The fallback used when robots.txt is missing or unusable
    pub fn allow_all() -> Self {
        Self {
            rules: None,
            crawl_delay: None,
        }
    }

    pub fn is_allow_all(&self) -> bool {
        self.rules.is_none()
    }

    /// Checks an absolute URL against the `*` group
    pub fn is_allowed(&self, url: &str) -> bool {
        match self.rules.as_deref() {
            None | Some("") => true,
            Some(rules) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(rules, ROBOTS_AGENT, url)
            }
        }
    }

    /// Returns the `Crawl-delay` declared for `*`, in seconds
    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay
    }
}

/// Finds the first `Crawl-delay` inside a group that names `*`
///
/// Consecutive `User-agent` lines form one group; the group ends at the
/// next `User-agent` line that follows a rule line.
fn wildcard_crawl_delay(content: &str) -> Option<f64> {
    let mut in_wildcard_group = false;
    let mut reading_agents = false;

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        if key.eq_ignore_ascii_case("user-agent") {
            if !reading_agents {
                in_wildcard_group = false;
            }
            reading_agents = true;
            in_wildcard_group |= value == ROBOTS_AGENT;
            continue;
        }

        reading_agents = false;
        if in_wildcard_group && key.eq_ignore_ascii_case("crawl-delay") {
            if let Ok(delay) = value.parse::<f64>() {
                return Some(delay);
            }
        }
    }

    None
}

//! Crawl session - the bounded breadth-first crawl engine
//!
//! A session owns the frontier, the visited set and the result store. It is
//! driven through `Idle -> Initializing -> Running -> Finished` exactly once:
//! - [`CrawlSession::initialize`] loads robots.txt and seeds the frontier
//! - [`CrawlSession::run`] drains the frontier until it is empty, the page
//!   cap is reached, or the session is cancelled
//! - after that the results are read-only and can be exported any number
//!   of times

use crate::config::{validate, CrawlConfig};
use crate::crawler::analyzer::ParsedPage;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::politeness::PolitenessController;
use crate::crawler::sitemap::load_sitemap;
use crate::output::{export_results, write_autosave};
use crate::state::SessionPhase;
use crate::storage::{PageRecord, ResultStore};
use crate::url::normalize_url;
use crate::SeoError;
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Observer called with `(pages_crawled, max_pages)` after every attempt
pub type ProgressObserver = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Counters describing a session's progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Fetch attempts completed (equal to the number of results)
    pub pages_crawled: usize,
    /// Attempts that did not end in HTTP 200
    pub errors: usize,
    /// Entries still queued
    pub frontier_len: usize,
    /// URLs marked visited
    pub visited: usize,
    /// Entries discarded by host scope or robots.txt
    pub skipped_by_policy: usize,
    /// Entries discarded because their URL was already visited
    pub skipped_duplicate: usize,
    /// Entries discarded for exceeding the depth limit
    pub skipped_depth: usize,
}

/// One crawl invocation
pub struct CrawlSession {
    config: CrawlConfig,
    base: String,
    base_url: Url,
    client: Client,
    politeness: PolitenessController,
    frontier: Frontier,
    visited: HashSet<String>,
    store: ResultStore,
    phase: SessionPhase,
    progress: Option<ProgressObserver>,
    cancel: CancellationToken,
    skipped_by_policy: usize,
    skipped_duplicate: usize,
    skipped_depth: usize,
}

impl CrawlSession {
    /// Creates an idle session
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration; validated here
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Session in the `Idle` phase
    /// * `Err(SeoError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: CrawlConfig) -> Result<Self, SeoError> {
        validate(&config)?;

        let base = normalize_url(&config.base_url)?;
        let base_url = Url::parse(&base).map_err(|e| crate::UrlError::Parse(e.to_string()))?;
        let client = build_http_client(&config.user_agent, &config.http)?;
        let politeness = PolitenessController::new(
            &base_url,
            config.crawler.include_subdomains,
            config.crawler.rate_limit(),
        );

        Ok(Self {
            config,
            base,
            base_url,
            client,
            politeness,
            frontier: Frontier::new(),
            visited: HashSet::new(),
            store: ResultStore::new(),
            phase: SessionPhase::Idle,
            progress: None,
            cancel: CancellationToken::new(),
            skipped_by_policy: 0,
            skipped_duplicate: 0,
            skipped_depth: 0,
        })
    }

    /// Registers a progress observer
    pub fn with_progress<F>(mut self, observer: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(observer));
        self
    }

    /// Uses an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a token that stops [`run`](Self::run) before its next fetch
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Loads politeness rules and seeds the frontier
    ///
    /// Sitemap `<loc>` URLs are queued at depth 0 first, then the base URL.
    /// Neither robots.txt nor sitemap.xml failures abort initialization.
    pub async fn initialize(&mut self) -> Result<(), SeoError> {
        self.transition(SessionPhase::Initializing)?;
        tracing::info!("Initializing crawl of {}", self.base);

        self.politeness
            .load_robots(&self.client, &self.base_url)
            .await;

        for loc in load_sitemap(&self.client, &self.base_url).await {
            match normalize_url(&loc) {
                Ok(url) => self.frontier.push(FrontierEntry::new(url, 0)),
                Err(e) => tracing::debug!("Ignoring sitemap entry {}: {}", loc, e),
            }
        }

        self.frontier.push(FrontierEntry::new(self.base.clone(), 0));

        tracing::info!("Frontier seeded with {} URLs", self.frontier.len());
        Ok(())
    }

    /// Runs the crawl loop to completion
    ///
    /// Stops when the frontier is empty, `max_pages` results exist, or the
    /// cancellation token fires. No single page failure ends the loop.
    pub async fn run(&mut self) -> Result<(), SeoError> {
        self.transition(SessionPhase::Running)?;

        let max_depth = self.config.crawler.max_depth;
        let max_pages = self.config.crawler.max_pages;
        let start_time = std::time::Instant::now();

        while self.store.len() < max_pages {
            if self.cancel.is_cancelled() {
                tracing::warn!("Crawl cancelled after {} pages", self.store.len());
                break;
            }

            let Some(entry) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if self.visited.contains(&entry.url) {
                self.skipped_duplicate += 1;
                continue;
            }
            if entry.depth > max_depth {
                self.skipped_depth += 1;
                continue;
            }
            if !self.politeness.can_fetch(&entry.url) {
                tracing::debug!("Skipping {} (out of scope or disallowed)", entry.url);
                self.skipped_by_policy += 1;
                continue;
            }

            self.visited.insert(entry.url.clone());
            self.politeness.wait_turn().await;

            tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);
            let (record, links) = match fetch_url(&self.client, &entry.url).await {
                Ok(page) => {
                    let follow = page.status == 200 && entry.depth < max_depth;
                    let link_base = Url::parse(&page.final_url).ok();

                    let parsed = ParsedPage::parse(&page.body);
                    let record = parsed.record(&entry.url, page.status);
                    let links = match (follow, link_base) {
                        (true, Some(link_base)) => parsed.links(&link_base),
                        _ => Vec::new(),
                    };
                    (record, links)
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", entry.url, e);
                    (PageRecord::transport_failure(&entry.url, e.to_string()), Vec::new())
                }
            };

            if record.is_error() && record.status != 0 {
                tracing::info!("{} returned HTTP {}", record.url, record.status);
            }
            let pages_crawled = self.store.push(record);

            if let Some(progress) = &self.progress {
                progress(pages_crawled, max_pages);
            }

            let interval = self.config.crawler.autosave_interval;
            if interval > 0 && pages_crawled % interval == 0 {
                self.autosave();
            }

            self.enqueue_links(&entry, links);
        }

        self.transition(SessionPhase::Finished)?;
        tracing::info!(
            "Crawl finished: {} pages ({} errors) in {:?}",
            self.store.len(),
            self.store.errors().len(),
            start_time.elapsed()
        );

        Ok(())
    }

    /// Initializes and runs the session
    pub async fn crawl(&mut self) -> Result<(), SeoError> {
        self.initialize().await?;
        self.run().await
    }

    /// Exports results under `base` (e.g. `out/results`)
    ///
    /// Does not modify the session; callable mid-crawl on a snapshot as well.
    pub fn export(&self, base: &Path) -> Result<Vec<PathBuf>, SeoError> {
        Ok(export_results(&self.store, base)?)
    }

    /// Exports results under the configured output directory and basename
    pub fn export_default(&self) -> Result<Vec<PathBuf>, SeoError> {
        self.export(&self.config.output.export_base())
    }

    /// Returns a copy of the current results and errors
    pub fn snapshot(&self) -> ResultStore {
        self.store.clone()
    }

    pub fn results(&self) -> &[PageRecord] {
        self.store.results()
    }

    pub fn errors(&self) -> &[PageRecord] {
        self.store.errors()
    }

    /// Returns `(pages_crawled, max_pages)`
    pub fn progress(&self) -> (usize, usize) {
        (self.store.len(), self.config.crawler.max_pages)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            pages_crawled: self.store.len(),
            errors: self.store.errors().len(),
            frontier_len: self.frontier.len(),
            visited: self.visited.len(),
            skipped_by_policy: self.skipped_by_policy,
            skipped_duplicate: self.skipped_duplicate,
            skipped_depth: self.skipped_depth,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Queues discovered links one hop deeper than `parent`
    ///
    /// Links already visited are dropped here; links still waiting in the
    /// frontier are queued again and discarded when popped.
    fn enqueue_links(&mut self, parent: &FrontierEntry, links: Vec<String>) {
        let mut queued = 0;
        for link in links {
            if self.visited.contains(&link) || !self.politeness.can_fetch(&link) {
                continue;
            }
            self.frontier.push(parent.child(link));
            queued += 1;
        }

        if queued > 0 {
            tracing::debug!("Queued {} links from {}", queued, parent.url);
        }
    }

    fn autosave(&self) {
        let base = self.config.output.autosave_base();
        if let Err(e) = write_autosave(self.store.results(), &base) {
            tracing::warn!("Autosave to {} failed: {}", base.display(), e);
        }
    }

    fn transition(&mut self, next: SessionPhase) -> Result<(), SeoError> {
        if !self.phase.can_transition_to(next) {
            return Err(SeoError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Session phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

//! Statistics over a finished (or interrupted) crawl
//!
//! This module summarises stored results for display at the end of a run.

use crate::storage::ResultStore;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Total number of recorded attempts
    pub total_pages: usize,

    /// Pages answered with HTTP 200
    pub successful_pages: usize,

    /// Pages in the error list (non-200 or transport failure)
    pub error_pages: usize,

    /// Count of pages by status code; 0 stands for transport failure
    pub pages_by_status: BTreeMap<u16, usize>,

    /// 200 pages with an empty title
    pub missing_titles: usize,

    /// 200 pages with an empty meta description
    pub missing_descriptions: usize,

    /// 200 pages with an empty first heading
    pub missing_h1: usize,
}

impl CrawlStatistics {
    /// Computes statistics from the result store
    pub fn from_store(store: &ResultStore) -> Self {
        let mut stats = Self {
            total_pages: store.len(),
            error_pages: store.errors().len(),
            ..Self::default()
        };

        for record in store.results() {
            *stats.pages_by_status.entry(record.status).or_insert(0) += 1;

            if record.is_error() {
                continue;
            }

            stats.successful_pages += 1;
            if record.title.is_empty() {
                stats.missing_titles += 1;
            }
            if record.description.is_empty() {
                stats.missing_descriptions += 1;
            }
            if record.h1.is_empty() {
                stats.missing_h1 += 1;
            }
        }

        stats
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.total_pages);
    println!("  Successful (200): {}", stats.successful_pages);
    println!("  Errors: {}", stats.error_pages);
    println!();

    println!("Pages by Status:");
    for (status, count) in &stats.pages_by_status {
        let percentage = if stats.total_pages > 0 {
            (*count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        let label = if *status == 0 {
            "transport error".to_string()
        } else {
            status.to_string()
        };
        println!("  {}: {} ({:.1}%)", label, count, percentage);
    }
    println!();

    println!("SEO gaps (200 pages):");
    println!("  Missing title: {}", stats.missing_titles);
    println!("  Missing description: {}", stats.missing_descriptions);
    println!("  Missing h1: {}", stats.missing_h1);
}

//! Storage module for crawl results
//!
//! This module holds the unit of crawl output, [`PageRecord`], and the
//! in-memory [`ResultStore`] that accumulates records in completion order.

mod memory;

pub use memory::ResultStore;

use serde::Serialize;

/// Column names shared by every export format, in output order
pub const RECORD_COLUMNS: [&str; 8] = [
    "url",
    "title",
    "description",
    "h1",
    "canonical",
    "meta_robots",
    "status",
    "error",
];

/// One crawled URL's outcome plus extracted SEO metadata
///
/// Text fields are empty when the element was absent. A `status` of 0 means
/// the request failed before any response arrived; `error` then holds the
/// transport failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub h1: String,
    pub canonical: String,
    pub meta_robots: String,
    pub status: u16,
    pub error: String,
}

impl PageRecord {
    /// Creates a record for a response with no extracted metadata yet
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            h1: String::new(),
            canonical: String::new(),
            meta_robots: String::new(),
            status,
            error: String::new(),
        }
    }

    /// Creates a record for a request that never produced a response
    pub fn transport_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            ..Self::new(url, 0)
        }
    }

    /// Returns true if this record belongs in the error list (status != 200)
    pub fn is_error(&self) -> bool {
        self.status != 200
    }

    /// Returns the record's fields as strings, in [`RECORD_COLUMNS`] order
    pub fn to_row(&self) -> [String; 8] {
        [
            self.url.clone(),
            self.title.clone(),
            self.description.clone(),
            self.h1.clone(),
            self.canonical.clone(),
            self.meta_robots.clone(),
            self.status.to_string(),
            self.error.clone(),
        ]
    }
}

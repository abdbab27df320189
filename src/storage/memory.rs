//! In-memory result store

use crate::storage::PageRecord;

/// Ordered collection of crawl outcomes
///
/// `results` holds every record in completion order; `errors` holds, in the
/// same order, copies of exactly those records whose status is not 200.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    results: Vec<PageRecord>,
    errors: Vec<PageRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed attempt and returns the new result count
    pub fn push(&mut self, record: PageRecord) -> usize {
        if record.is_error() {
            self.errors.push(record.clone());
        }
        self.results.push(record);
        self.results.len()
    }

    pub fn results(&self) -> &[PageRecord] {
        &self.results
    }

    pub fn errors(&self) -> &[PageRecord] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

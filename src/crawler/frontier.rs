//! Frontier: the FIFO queue of URLs waiting to be fetched
//!
//! Entries are never mutated after push. Deduplication is not done here:
//! the same URL may sit in the queue several times, and the session
//! discards every copy after the first one it fetches.

use std::collections::VecDeque;

/// A URL queued for fetching with its hop distance from the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized absolute URL
    pub url: String,

    /// Link hops from the base URL; seeds are depth 0
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// Entry for a link discovered on the page this entry points to
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self::new(url, self.depth + 1)
    }
}

/// Breadth-first work queue
///
/// As long as links are pushed only when their page completes, every
/// depth-`d` entry is popped before any depth-`d+1` entry found from it.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    /// Removes the entry at the front of the queue
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Returns the number of entries waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

//! URL handling module for Seo-Ripple
//!
//! This module provides URL normalization, host extraction and the host-scope
//! check that keeps a crawl on its base site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, host_in_scope};
pub use normalize::{normalize_parsed, normalize_url};

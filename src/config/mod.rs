//! Configuration module for Seo-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting except the base URL has a default, so a configuration can also
//! be built directly with [`CrawlConfig::new`].
//!
//! # Example
//!
//! ```no_run
//! use seo_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-ripple.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, CrawlerConfig, HttpConfig, OutputConfig, UserAgentConfig, MAX_RATE_LIMIT_SECONDS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

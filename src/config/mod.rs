//! Configuration module for Sumi-Glean
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_glean::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("glean.toml")).unwrap();
//! println!("Crawler will stop after {} pages", config.crawl.max_pages_to_crawl);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CookieConfig, CrawlConfig, RendererConfig, DEFAULT_NAVIGATION_TIMEOUT_MS,
    DEFAULT_SELECTOR_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

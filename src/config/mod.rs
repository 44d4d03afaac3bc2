//! Configuration module for Course-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use course_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("course-scout.toml")).unwrap();
//! println!("Crawling catalog at: {}", config.crawler.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DetailFailurePolicy, IndexConfig, LlmConfig, ServerConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

//! Configuration module for chartlink
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a working production default, so the CLI runs without a
//! config file and a partial file only overrides the sections it names.
//!
//! # Example
//!
//! ```no_run
//! use chartlink::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("chartlink.toml")).unwrap();
//! println!("Chart base URL: {}", config.chart.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ChartConfig, Config, HttpConfig, ResolverConfig};

// Re-export parser functions
pub use parser::load_config;

// Re-export validation for callers that build a Config in code
pub use validation::validate;

//! Chartlink: weekly chart retrieval and streaming-link resolution
//!
//! This crate fetches a weekly music chart page, extracts the ranked entries
//! (structured JSON-LD data first, markup heuristics second), and resolves each
//! entry to a best-effort streaming link without using the platform's API.

pub mod chart;
pub mod config;
pub mod http;
pub mod resolver;

use thiserror::Error;

/// Main error type for chartlink operations
#[derive(Debug, Error)]
pub enum ChartlinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chart error: {0}")]
    Chart(#[from] chart::ChartError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] http::FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for chartlink operations
pub type Result<T> = std::result::Result<T, ChartlinkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use chart::{ChartClient, ChartEntry, ChartSnapshot};
pub use config::Config;
pub use http::HttpClient;
pub use resolver::{LinkResolver, LinkSource, ResolvedLink};

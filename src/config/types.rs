use serde::Deserialize;

/// Main configuration structure for chartlink
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub chart: ChartConfig,
    pub resolver: ResolverConfig,
}

/// HTTP access layer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent on every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header sent on every request
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Retry attempts after the first try, for transient failures only
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries (milliseconds)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 25,
            max_retries: 3,
            backoff_ms: 600,
        }
    }
}

/// Chart source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart page URL without the trailing date segment
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Entries returned when the caller does not ask for a specific count
    #[serde(rename = "default-size")]
    pub default_size: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.billboard.com/charts/hot-100".to_string(),
            default_size: 10,
        }
    }
}

/// Link resolver configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Catalog search endpoint (iTunes Search shaped)
    #[serde(rename = "catalog-url")]
    pub catalog_url: String,

    /// Storefront country passed to the catalog search
    #[serde(rename = "catalog-country")]
    pub catalog_country: String,

    /// Cross-platform link resolution endpoint (song.link shaped)
    #[serde(rename = "crosslink-url")]
    pub crosslink_url: String,

    /// Platform key to extract from the cross-platform response
    pub platform: String,

    /// Base URL for the deterministic search fallback
    #[serde(rename = "search-base-url")]
    pub search_base_url: String,

    /// Per-provider request timeout (seconds)
    #[serde(rename = "provider-timeout-secs")]
    pub provider_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://itunes.apple.com/search".to_string(),
            catalog_country: "US".to_string(),
            crosslink_url: "https://api.song.link/v1-alpha.1/links".to_string(),
            platform: "spotify".to_string(),
            search_base_url: "https://open.spotify.com".to_string(),
            provider_timeout_secs: 20,
        }
    }
}

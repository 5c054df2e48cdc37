//! Link resolution
//!
//! This module resolves a (title, artist) pair to a playable platform
//! link without using the platform's API:
//! - Ordered provider chain, tried until one yields a confident match
//! - Deterministic search-URL fallback when every provider fails
//!
//! [`LinkResolver::get_link`] is a total function: provider failures are
//! absorbed internally and never reach the caller, who always receives a
//! usable link.

mod catalog;
mod crosslink;
mod fallback;

pub use catalog::CatalogSearch;
pub use crosslink::CrosslinkService;
pub use fallback::SearchFallback;

use crate::config::ResolverConfig;
use crate::http::{FetchError, HttpClient};
use crate::ConfigError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// How a link was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkSource {
    /// A provider produced a direct track link
    ProviderChain,

    /// Every provider failed; the link is a platform search page
    SearchFallback,
}

/// A resolved, always-usable external link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: Url,
    pub source: LinkSource,
}

/// Internal provider failures, absorbed by the resolver and never surfaced
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("malformed {provider} response: {source}")]
    Malformed {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} had no match")]
    NoMatch { provider: &'static str },
}

/// A single step of the resolution chain
#[async_trait]
pub trait LinkProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Attempts to produce a direct platform link for the track
    async fn lookup(
        &self,
        http: &HttpClient,
        title: &str,
        artist: &str,
    ) -> Result<Url, ProviderError>;
}

/// Default provider: catalog lookup chained into cross-platform resolution
///
/// The catalog search runs first because it yields a precise track
/// identifier; the cross-platform service then translates that identifier
/// to the target platform. Either step coming up empty fails the provider
/// as a whole.
pub struct ChainedLookup {
    catalog: CatalogSearch,
    crosslink: CrosslinkService,
}

impl ChainedLookup {
    pub fn new(catalog: CatalogSearch, crosslink: CrosslinkService) -> Self {
        Self { catalog, crosslink }
    }
}

#[async_trait]
impl LinkProvider for ChainedLookup {
    fn name(&self) -> &'static str {
        "catalog-crosslink"
    }

    async fn lookup(
        &self,
        http: &HttpClient,
        title: &str,
        artist: &str,
    ) -> Result<Url, ProviderError> {
        let track_url = self
            .catalog
            .find_track_url(http, title, artist)
            .await?
            .ok_or(ProviderError::NoMatch {
                provider: "catalog",
            })?;

        tracing::debug!(%track_url, "catalog match");

        self.crosslink
            .platform_url(http, &track_url)
            .await?
            .ok_or(ProviderError::NoMatch {
                provider: "crosslink",
            })
    }
}

/// Resolves tracks to platform links via the provider chain
pub struct LinkResolver {
    http: HttpClient,
    providers: Vec<Box<dyn LinkProvider>>,
    fallback: SearchFallback,
}

impl LinkResolver {
    /// Builds the default resolver from configuration
    ///
    /// The chain holds one provider (catalog search into cross-platform
    /// resolution), followed by the search fallback.
    pub fn new(http: HttpClient, config: &ResolverConfig) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(config.provider_timeout_secs);

        let catalog = CatalogSearch::new(
            parse_endpoint("catalog_url", &config.catalog_url)?,
            config.catalog_country.clone(),
            timeout,
        );
        let crosslink = CrosslinkService::new(
            parse_endpoint("crosslink_url", &config.crosslink_url)?,
            config.platform.clone(),
            timeout,
        );
        let fallback = SearchFallback::new(parse_endpoint(
            "search_base_url",
            &config.search_base_url,
        )?);

        Ok(Self {
            http,
            providers: vec![Box::new(ChainedLookup::new(catalog, crosslink))],
            fallback,
        })
    }

    /// Builds a resolver with a custom provider chain
    pub fn with_providers(
        http: HttpClient,
        providers: Vec<Box<dyn LinkProvider>>,
        fallback: SearchFallback,
    ) -> Self {
        Self {
            http,
            providers,
            fallback,
        }
    }

    /// Resolves the best link for a track
    ///
    /// Total function: tries each provider in order and degrades to the
    /// search fallback when none yields a link. Never blocks indefinitely
    /// (every provider request carries its own timeout) and never fails.
    pub async fn get_link(&self, title: &str, artist: &str) -> ResolvedLink {
        for provider in &self.providers {
            match provider.lookup(&self.http, title, artist).await {
                Ok(url) => {
                    tracing::debug!(provider = provider.name(), %url, "provider produced a link");
                    return ResolvedLink {
                        url,
                        source: LinkSource::ProviderChain,
                    };
                }
                Err(err) => {
                    tracing::debug!(
                        provider = provider.name(),
                        error = %err,
                        "provider failed, trying next"
                    );
                }
            }
        }

        ResolvedLink {
            url: self.fallback.link(title, artist),
            source: LinkSource::SearchFallback,
        }
    }
}

fn parse_endpoint(field: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))
}

//! Catalog lookup (iTunes Search shaped)
//!
//! Free-text search against a public song catalog. The first result's
//! track URL feeds the cross-platform resolution step; the catalog's own
//! relevance ranking is trusted, so no re-ranking happens here.

use super::ProviderError;
use crate::http::HttpClient;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Typed subset of the catalog search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    track_view_url: Option<String>,
}

/// Song catalog search client
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    endpoint: Url,
    country: String,
    timeout: Duration,
}

impl CatalogSearch {
    pub fn new(endpoint: Url, country: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            country,
            timeout,
        }
    }

    /// Searches the catalog for a track and returns its view URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Url))` - The first matching track's URL
    /// * `Ok(None)` - The catalog had no match for the query
    /// * `Err(ProviderError)` - The lookup itself failed
    pub async fn find_track_url(
        &self,
        http: &HttpClient,
        title: &str,
        artist: &str,
    ) -> Result<Option<Url>, ProviderError> {
        let term = format!("{} {}", title, artist);
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("term", term)
            .append_pair("media", "music")
            .append_pair("entity", "song")
            .append_pair("limit", "1")
            .append_pair("country", &self.country);

        let response = http
            .get_with_timeout(url.as_str(), &[], Some(self.timeout))
            .await?;

        if !response.is_success() {
            return Err(ProviderError::Status {
                provider: "catalog",
                status: response.status,
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&response.body).map_err(|source| ProviderError::Malformed {
                provider: "catalog",
                source,
            })?;

        let Some(first) = parsed.results.into_iter().next() else {
            return Ok(None);
        };

        // An unparseable track URL counts as no match, not a failure
        Ok(first.track_view_url.and_then(|raw| Url::parse(&raw).ok()))
    }
}

//! Cross-platform link resolution (song.link shaped)
//!
//! Translates a track URL from one platform into its equivalents on
//! others, then extracts the one platform this resolver targets.

use super::ProviderError;
use crate::http::HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Typed subset of the cross-platform response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinksResponse {
    #[serde(default)]
    links_by_platform: HashMap<String, PlatformLink>,
}

#[derive(Debug, Deserialize)]
struct PlatformLink {
    url: Option<String>,
}

/// Cross-platform resolution client
#[derive(Debug, Clone)]
pub struct CrosslinkService {
    endpoint: Url,
    platform: String,
    timeout: Duration,
}

impl CrosslinkService {
    pub fn new(endpoint: Url, platform: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            platform,
            timeout,
        }
    }

    /// Resolves a source track URL to the target platform's URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Url))` - The target platform's link
    /// * `Ok(None)` - The response carried no entry for the target platform
    /// * `Err(ProviderError)` - The lookup itself failed
    pub async fn platform_url(
        &self,
        http: &HttpClient,
        source: &Url,
    ) -> Result<Option<Url>, ProviderError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", source.as_str());

        let response = http
            .get_with_timeout(url.as_str(), &[], Some(self.timeout))
            .await?;

        if !response.is_success() {
            return Err(ProviderError::Status {
                provider: "crosslink",
                status: response.status,
            });
        }

        let parsed: LinksResponse =
            serde_json::from_str(&response.body).map_err(|source| ProviderError::Malformed {
                provider: "crosslink",
                source,
            })?;

        let link = parsed
            .links_by_platform
            .get(&self.platform)
            .and_then(|entry| entry.url.as_deref())
            .and_then(|raw| Url::parse(raw).ok());

        Ok(link)
    }
}

//! HTTP client implementation
//!
//! Retries are limited to idempotent GET requests and transient failures:
//! network errors, HTTP 5xx, and HTTP 429. Other non-2xx statuses are
//! returned to the caller unchanged, since what counts as a failure depends
//! on the call site.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the HTTP access layer
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Giving up on {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// Result of a successful fetch, including terminal non-2xx responses
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: String,

    /// Final URL after redirects
    pub final_url: String,
}

impl FetchResponse {
    /// True when the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds an HTTP client with shared headers and timeouts
///
/// # Arguments
///
/// * `config` - The HTTP access layer configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP client with retry policy, shared by the extractor and the resolver
///
/// Stateless across calls: retry counters are local to each request, and the
/// client can be cloned cheaply (the connection pool is shared).
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    backoff: Duration,
}

impl HttpClient {
    /// Creates a client from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
        })
    }

    /// Fetches a URL with the configured default timeout
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    /// * `headers` - Extra request headers as (name, value) pairs
    pub async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<FetchResponse, FetchError> {
        self.get_with_timeout(url, headers, None).await
    }

    /// Fetches a URL, overriding the request timeout
    ///
    /// Transient failures (network errors, 5xx, 429) are retried with
    /// exponential backoff up to the configured ceiling. Terminal non-2xx
    /// statuses are returned in the response; the caller decides whether
    /// they are errors.
    pub async fn get_with_timeout(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<FetchResponse, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match self.try_get(url, headers, timeout).await {
                Ok(response) => {
                    if is_retryable_status(response.status) && attempt <= self.max_retries {
                        tracing::debug!(
                            url,
                            status = response.status,
                            attempt,
                            "transient status, retrying"
                        );
                        self.wait(attempt).await;
                        continue;
                    }

                    if is_retryable_status(response.status) {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last_error: format!("HTTP {}", response.status),
                        });
                    }

                    return Ok(response);
                }
                Err(err) => {
                    if attempt <= self.max_retries && is_transient(&err) {
                        tracing::debug!(url, error = %err, attempt, "transient error, retrying");
                        self.wait(attempt).await;
                        continue;
                    }

                    if attempt > 1 {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last_error: err.to_string(),
                        });
                    }

                    return Err(classify_error(url, err));
                }
            }
        }
    }

    /// Performs a single GET attempt
    async fn try_get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<FetchResponse, reqwest::Error> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(FetchResponse {
            status,
            body,
            final_url,
        })
    }

    /// Sleeps for the backoff delay of the given attempt (1-based)
    async fn wait(&self, attempt: u32) {
        let exponent = attempt.saturating_sub(1).min(10);
        let delay = self.backoff * 2u32.pow(exponent);
        tokio::time::sleep(delay).await;
    }
}

/// Statuses worth retrying: rate limiting and server-side failures
fn is_retryable_status(status: u16) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS.as_u16() || (500..600).contains(&status)
}

/// Transient errors: timeouts, connection failures, interrupted transfers
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

/// Maps a first-attempt reqwest error to a FetchError
fn classify_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}

//! HTTP access layer
//!
//! This module performs all outbound requests for the crate, including:
//! - Building HTTP clients with shared headers and timeouts
//! - GET requests with bounded exponential-backoff retry
//! - Error classification (transient vs terminal)
//!
//! Both the chart extractor and the link resolver receive an injected
//! [`HttpClient`] rather than holding ambient global state, so callers can
//! configure one instance and reuse its connection pool across calls.

mod client;

pub use client::{build_http_client, FetchError, FetchResponse, HttpClient};

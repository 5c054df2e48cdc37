//! Chart retrieval and extraction
//!
//! This module turns a weekly chart page into an ordered list of
//! (rank, title, artist) entries:
//! - Structured-data (JSON-LD) extraction, the resilient preferred path
//! - Markup fallback driven by structural heuristics
//! - Rank validation: keep-first on duplicates, contiguous renumbering
//! - Chart-week date arithmetic
//!
//! [`ChartClient`] joins the HTTP access layer with the extractor and is
//! the caller-facing entry point.

mod markup;
mod normalize;
mod structured;
mod week;

pub use normalize::clean_text;
pub use week::{chart_week, chart_weeks_in_month};

use crate::config::ChartConfig;
use crate::http::{FetchError, HttpClient};
use chrono::NaiveDate;
use scraper::Html;
use serde::Serialize;
use thiserror::Error;

/// A single ranked chart entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    /// Chart position, contiguous from 1
    pub rank: u32,

    /// Track title, normalized and non-empty
    pub title: String,

    /// Track artist, normalized and non-empty
    pub artist: String,
}

/// The ranked list for one publication week
#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot {
    /// The chart week (always a publication Saturday)
    pub date: NaiveDate,

    /// Entries ordered by ascending rank
    pub entries: Vec<ChartEntry>,
}

/// Chart retrieval errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("chart page returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Extraction errors: neither strategy produced usable entries
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no entries found")]
    NoEntries,
}

/// Entry as produced by a strategy, before rank validation
///
/// The title is normalized and non-empty; the artist is normalized but may
/// still be empty, and the source rank may be absent.
pub(crate) struct RawEntry {
    pub rank: Option<u32>,
    pub title: String,
    pub artist: String,
}

/// A single extraction strategy over a parsed document
trait ParseStrategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Minimum surviving entries for this strategy's result to be trusted
    fn min_entries(&self) -> usize;

    fn parse(&self, document: &Html) -> Vec<RawEntry>;
}

/// JSON-LD extraction, the preferred strategy
struct StructuredData;

/// Structural markup heuristics, the fallback strategy
struct MarkupFallback;

impl ParseStrategy for StructuredData {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    fn min_entries(&self) -> usize {
        1
    }

    fn parse(&self, document: &Html) -> Vec<RawEntry> {
        structured::extract_entries(document)
    }
}

impl ParseStrategy for MarkupFallback {
    fn name(&self) -> &'static str {
        "markup-fallback"
    }

    // A single heuristic hit is indistinguishable from a stray nav item
    fn min_entries(&self) -> usize {
        2
    }

    fn parse(&self, document: &Html) -> Vec<RawEntry> {
        markup::extract_entries(document)
    }
}

/// Extracts the full ranked list from a chart page document
///
/// Strategies run in fixed priority order: structured data first, markup
/// fallback second. The result carries every entry found; callers truncate
/// to the size they want.
///
/// # Returns
///
/// * `Ok(Vec<ChartEntry>)` - Entries with contiguous ranks starting at 1
/// * `Err(ExtractError)` - Neither strategy produced usable entries
pub fn extract(html: &str) -> Result<Vec<ChartEntry>, ExtractError> {
    let document = Html::parse_document(html);
    let strategies: [&dyn ParseStrategy; 2] = [&StructuredData, &MarkupFallback];

    for strategy in strategies {
        if let Some(entries) = finalize(strategy.parse(&document), strategy.min_entries()) {
            tracing::debug!(
                strategy = strategy.name(),
                count = entries.len(),
                "extracted entries"
            );
            return Ok(entries);
        }
    }

    Err(ExtractError::NoEntries)
}

/// Validates and renumbers a strategy's raw entries
///
/// Drops entries whose title or artist normalized to empty, orders by the
/// source ranks when every entry has one (document order otherwise), keeps
/// the first occurrence of a duplicated rank, and renumbers contiguously
/// from 1. Returns `None` when fewer than `min_entries` survive, or when
/// drops occurred and fewer than two survive.
fn finalize(raw: Vec<RawEntry>, min_entries: usize) -> Option<Vec<ChartEntry>> {
    let total = raw.len();

    let mut usable: Vec<RawEntry> = raw
        .into_iter()
        .filter(|e| !e.title.is_empty() && !e.artist.is_empty())
        .collect();
    let dropped = total - usable.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped entries missing a title or artist");
    }

    // Source ranks are only trusted when every surviving entry has one
    if usable.iter().all(|e| e.rank.is_some()) {
        usable.sort_by_key(|e| e.rank.unwrap_or(u32::MAX));
        usable.dedup_by_key(|e| e.rank.unwrap_or(u32::MAX));
    }

    let min_required = if dropped > 0 { min_entries.max(2) } else { min_entries };
    if usable.len() < min_required {
        return None;
    }

    Some(
        usable
            .into_iter()
            .enumerate()
            .map(|(index, e)| ChartEntry {
                rank: index as u32 + 1,
                title: e.title,
                artist: e.artist,
            })
            .collect(),
    )
}

/// Chart retrieval facade joining the HTTP layer and the extractor
pub struct ChartClient {
    http: HttpClient,
    config: ChartConfig,
}

impl ChartClient {
    /// Creates a client around an injected HTTP access layer
    pub fn new(http: HttpClient, config: ChartConfig) -> Self {
        Self { http, config }
    }

    /// Fetches and extracts the chart for the week containing `date`
    ///
    /// The date is snapped to the chart's Saturday publication day and the
    /// result is truncated to at most `size` entries.
    ///
    /// # Returns
    ///
    /// * `Ok(ChartSnapshot)` - The chart for the snapped week
    /// * `Err(ChartError)` - The page could not be fetched or parsed
    pub async fn get_chart(&self, date: NaiveDate, size: usize) -> Result<ChartSnapshot, ChartError> {
        let week = chart_week(date);
        let url = format!(
            "{}/{}/",
            self.config.base_url.trim_end_matches('/'),
            week.format("%Y-%m-%d")
        );

        tracing::info!(%url, "fetching chart page");
        let response = self.http.get(&url, &[]).await?;

        if !response.is_success() {
            return Err(ChartError::Status {
                url,
                status: response.status,
            });
        }

        let mut entries = extract(&response.body)?;
        entries.truncate(size);

        Ok(ChartSnapshot {
            date: week,
            entries,
        })
    }
}

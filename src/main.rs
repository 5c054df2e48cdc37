//! chartlink main entry point
//!
//! Command-line front end: pick a chart week, fetch the chart, resolve a
//! streaming link per entry, and render the result as a table or JSON.

use anyhow::Context;
use chartlink::chart::{chart_week, chart_weeks_in_month, ChartClient, ChartSnapshot};
use chartlink::config::load_config;
use chartlink::http::HttpClient;
use chartlink::resolver::{LinkResolver, LinkSource};
use chartlink::Config;
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// chartlink: weekly chart to streaming links
///
/// Fetches the weekly chart for a date, extracts the ranked entries, and
/// resolves each one to a streaming link without using the platform's API.
#[derive(Parser, Debug)]
#[command(name = "chartlink")]
#[command(version)]
#[command(about = "Fetch a weekly music chart and resolve streaming links", long_about = None)]
struct Cli {
    /// Chart date (YYYY-MM-DD), snapped to the chart week; defaults to today
    #[arg(value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Number of entries to show
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    size: Option<u8>,

    /// Path to TOML configuration file (built-in defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Skip link resolution and show the chart only
    #[arg(long)]
    no_links: bool,

    /// List the chart weeks of a month (YYYY-MM) and exit
    #[arg(long, value_name = "MONTH", conflicts_with = "date")]
    weeks: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// One rendered row: a chart entry joined with its resolved link
#[derive(Debug, Serialize)]
struct Row {
    rank: u32,
    title: String,
    artist: String,
    link: String,
    source: LinkSource,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(month) = &cli.weeks {
        return list_weeks(month);
    }

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let size = cli.size.map_or(config.chart.default_size, usize::from);

    let http = HttpClient::new(&config.http).context("failed to build HTTP client")?;
    let charts = ChartClient::new(http.clone(), config.chart.clone());

    let snapshot = charts
        .get_chart(date, size)
        .await
        .with_context(|| format!("could not load the chart for {}", chart_week(date)))?;

    tracing::info!(
        week = %snapshot.date,
        entries = snapshot.entries.len(),
        "chart loaded"
    );

    if cli.no_links {
        render_chart(&snapshot, cli.json)?;
        return Ok(());
    }

    let resolver =
        LinkResolver::new(http, &config.resolver).context("failed to build link resolver")?;

    let mut rows = Vec::with_capacity(snapshot.entries.len());
    for entry in &snapshot.entries {
        let link = resolver.get_link(&entry.title, &entry.artist).await;
        rows.push(Row {
            rank: entry.rank,
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            link: link.url.to_string(),
            source: link.source,
        });
    }

    render_rows(&snapshot, &rows, cli.json)?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chartlink=warn"),
            1 => EnvFilter::new("chartlink=info,warn"),
            2 => EnvFilter::new("chartlink=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --weeks: prints the chart weeks of the given month
fn list_weeks(month: &str) -> anyhow::Result<()> {
    let (year, month) = parse_month(month)
        .with_context(|| format!("invalid month '{}', expected YYYY-MM", month))?;

    let weeks = chart_weeks_in_month(year, month);
    anyhow::ensure!(!weeks.is_empty(), "no chart weeks for {}-{:02}", year, month);

    for week in weeks {
        println!("{}", week);
    }
    Ok(())
}

fn parse_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Renders a chart without links (--no-links)
fn render_chart(snapshot: &ChartSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("Chart week {}\n", snapshot.date);
    let title_width = column_width(snapshot.entries.iter().map(|e| e.title.as_str()), 5);

    println!("{:>4}  {:<title_width$}  Artist", "Rank", "Title");
    for entry in &snapshot.entries {
        println!(
            "{:>4}  {:<title_width$}  {}",
            entry.rank, entry.title, entry.artist
        );
    }
    Ok(())
}

/// Renders the joined chart + links table
fn render_rows(snapshot: &ChartSnapshot, rows: &[Row], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!("Chart week {}\n", snapshot.date);
    let title_width = column_width(rows.iter().map(|r| r.title.as_str()), 5);
    let artist_width = column_width(rows.iter().map(|r| r.artist.as_str()), 6);

    println!(
        "{:>4}  {:<title_width$}  {:<artist_width$}  Link",
        "Rank", "Title", "Artist"
    );
    for row in rows {
        println!(
            "{:>4}  {:<title_width$}  {:<artist_width$}  {}",
            row.rank, row.title, row.artist, row.link
        );
    }

    let direct = rows
        .iter()
        .filter(|r| r.source == LinkSource::ProviderChain)
        .count();
    println!("\n{} of {} links resolved directly", direct, rows.len());
    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, minimum: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(minimum)
        .max(minimum)
}

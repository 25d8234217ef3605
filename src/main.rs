//! # stormharvest
//!
//! A two-stage pipeline that scrapes a storm-season page into per-storm
//! records and extracts structured fields from each record with an LLM.
//!
//! ## Usage
//!
//! ```sh
//! stormharvest scrape -o hurricane_data.json
//! stormharvest extract -i hurricane_data.json -o hurricane_data.csv
//! ```
//!
//! ## Architecture
//!
//! The stages only communicate through the intermediate JSON file:
//! 1. **Scrape**: fetch the page, group paragraphs under each storm heading,
//!    write the record list as pretty JSON
//! 2. **Extract**: per record, build a chat prompt, call an OpenAI-compatible
//!    endpoint at temperature 0, normalize the reply into a row, and write
//!    the accumulated rows as a CSV table
//!
//! Records are processed strictly one at a time. A record whose API call or
//! JSON reply fails is logged and skipped; it never aborts the batch.

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

mod api;
mod cli;
mod config;
mod models;
mod normalize;
mod outputs;
mod prompt;
mod scrapers;
mod utils;

use api::{ask_with_backoff, ChatClient};
use cli::{Cli, Command};
use config::ExtractorConfig;
use models::{RecordStatus, StormRecord, StormRow};
use prompt::{build_messages, FIELD_SPEC};
use utils::{ensure_writable_parent, looks_truncated, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("stormharvest starting up");

    let args = Cli::parse();
    match args.command {
        Command::Scrape { url, output } => run_scrape(&url, &output).await?,
        Command::Extract { input, output, config, api_key } => {
            run_extract(&input, &output, config.as_deref(), api_key).await?
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Scrape pipeline: fetch the season page, extract per-storm records, write
/// the intermediate JSON file.
async fn run_scrape(url: &str, output: &str) -> Result<(), Box<dyn Error>> {
    Url::parse(url)?;
    ensure_writable_parent(output).await?;

    let html = scrapers::wikipedia::fetch_page(url).await?;
    let records = scrapers::wikipedia::extract_storm_records(&html);
    outputs::json::write_records(&records, output).await?;

    info!(count = records.len(), path = %output, "Scrape complete");
    Ok(())
}

/// Extract pipeline: read the scraped records, run each through the model,
/// normalize, and write the CSV table.
async fn run_extract(
    input: &str,
    output: &str,
    config_path: Option<&str>,
    api_key: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let config = ExtractorConfig::load(config_path).await?;
    let api_key = config.resolve_api_key(api_key)?;
    ensure_writable_parent(output).await?;

    let records = outputs::json::read_records(input).await?;
    let client = ChatClient::new(&config, api_key)?;

    let total = records.len();
    info!(total, model = %config.model, "Starting record extraction");

    // One record at a time; .then() runs the futures sequentially.
    let results: Vec<(RecordStatus, Option<StormRow>)> = stream::iter(records.iter().enumerate())
        .then(|(i, record)| {
            let client = &client;
            async move {
                let (status, row) = process_record(client, record).await;
                info!(index = i, storm_name = %record.storm_name, status = %status, "Processed record");
                (status, row)
            }
        })
        .collect()
        .await;

    let extracted = results.iter().filter(|(s, _)| *s == RecordStatus::Extracted).count();
    let skipped = results.iter().filter(|(s, _)| *s == RecordStatus::SkippedUnusable).count();
    let failed = results.iter().filter(|(s, _)| *s == RecordStatus::FailedSkipped).count();

    let rows: Vec<StormRow> = results.into_iter().filter_map(|(_, row)| row).collect();
    outputs::csv::write_table(&rows, output).await?;

    info!(
        total,
        extracted,
        skipped_unusable = skipped,
        failed_skipped = failed,
        path = %output,
        "Extraction complete"
    );
    Ok(())
}

/// Run one record through prompt → model → JSON parse → normalization.
///
/// A reply that fails to parse with an EOF error (token-budget truncation) is
/// re-asked once before the record is given up on.
async fn process_record(client: &ChatClient, record: &StormRecord) -> (RecordStatus, Option<StormRow>) {
    let messages = match build_messages(record, FIELD_SPEC) {
        Ok(messages) => messages,
        Err(e) => {
            warn!(storm_name = %record.storm_name, error = %e, "Failed to build prompt; skipping record");
            return (RecordStatus::FailedSkipped, None);
        }
    };

    let reply = match ask_with_backoff(client, &messages).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(storm_name = %record.storm_name, error = %e, "API call failed; skipping record");
            return (RecordStatus::FailedSkipped, None);
        }
    };

    let mut parsed = serde_json::from_str::<serde_json::Value>(&reply);

    // If the parse failed due to EOF (truncation), re-ask ONCE
    if let Err(ref e) = parsed {
        if looks_truncated(e) {
            warn!(storm_name = %record.storm_name, error = %e, "EOF while parsing; re-asking once");
            match ask_with_backoff(client, &messages).await {
                Ok(r2) => {
                    parsed = serde_json::from_str::<serde_json::Value>(&r2);
                }
                Err(e2) => {
                    warn!(storm_name = %record.storm_name, error = %e2, "Re-ask failed; will skip record");
                }
            }
        }
    }

    let output = match parsed {
        Ok(output) if output.is_object() => output,
        Ok(other) => {
            warn!(
                storm_name = %record.storm_name,
                response_preview = %truncate_for_log(&other.to_string(), 300),
                "Model reply was not a JSON object; skipping record"
            );
            return (RecordStatus::FailedSkipped, None);
        }
        Err(e) => {
            warn!(
                storm_name = %record.storm_name,
                error = %e,
                response_preview = %truncate_for_log(&reply, 300),
                "Model returned non-conforming JSON; skipping record"
            );
            return (RecordStatus::FailedSkipped, None);
        }
    };

    match normalize::build_row(record, &output) {
        Some(row) => {
            debug!(storm_name = %record.storm_name, "Normalized row");
            (RecordStatus::Extracted, Some(row))
        }
        None => (RecordStatus::SkippedUnusable, None),
    }
}

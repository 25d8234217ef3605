//! Command-line interface definitions for stormharvest.
//!
//! Two subcommands, one per pipeline stage; the operator runs `scrape` first
//! and `extract` afterwards, with the intermediate JSON file as the only
//! hand-off between them.

use clap::{Parser, Subcommand};

/// Default season page scraped when no URL is given.
pub const DEFAULT_PAGE_URL: &str = "https://en.wikipedia.org/wiki/1975_Pacific_hurricane_season";

/// Command-line arguments for the stormharvest application.
///
/// # Examples
///
/// ```sh
/// stormharvest scrape -o hurricane_data.json
/// stormharvest extract -i hurricane_data.json -o hurricane_data.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the season page into a JSON file of per-storm records
    Scrape {
        /// URL of the season page to scrape
        #[arg(short, long, default_value = DEFAULT_PAGE_URL)]
        url: String,

        /// Path of the JSON file to write
        #[arg(short, long, default_value = "hurricane_data.json")]
        output: String,
    },
    /// Extract structured fields from scraped records into a CSV table
    Extract {
        /// Path of the JSON file produced by `scrape`
        #[arg(short, long, default_value = "hurricane_data.json")]
        input: String,

        /// Path of the CSV table to write
        #[arg(short, long, default_value = "hurricane_data.csv")]
        output: String,

        /// Optional path to a YAML config file (API base URL, model, token budget)
        #[arg(short, long)]
        config: Option<String>,

        /// API key for the model endpoint
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(&["stormharvest", "scrape"]);
        match cli.command {
            Command::Scrape { url, output } => {
                assert_eq!(url, DEFAULT_PAGE_URL);
                assert_eq!(output, "hurricane_data.json");
            }
            _ => panic!("expected scrape"),
        }
    }

    #[test]
    fn test_extract_flags() {
        let cli = Cli::parse_from(&[
            "stormharvest",
            "extract",
            "-i",
            "records.json",
            "-o",
            "table.csv",
            "--api-key",
            "sk-test",
        ]);
        match cli.command {
            Command::Extract { input, output, config, api_key } => {
                assert_eq!(input, "records.json");
                assert_eq!(output, "table.csv");
                assert!(config.is_none());
                assert_eq!(api_key.as_deref(), Some("sk-test"));
            }
            _ => panic!("expected extract"),
        }
    }
}

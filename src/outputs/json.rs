//! Intermediate JSON file for scraped storm records.
//!
//! The scraper writes a pretty-printed JSON array of records; the extractor
//! reads the same file back. Order is preserved in both directions.

use crate::models::StormRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write the scraped records as a pretty-printed JSON array.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_records(records: &[StormRecord], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).await?;
    info!(count = records.len(), "Wrote storm records");
    Ok(())
}

/// Read storm records back from the intermediate file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn read_records(path: &str) -> Result<Vec<StormRecord>, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    let records: Vec<StormRecord> = serde_json::from_str(&contents)?;
    info!(count = records.len(), "Read storm records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<StormRecord> {
        vec![
            StormRecord {
                storm_name: "Hurricane Agatha".to_string(),
                content: vec!["First.".to_string(), "Second.".to_string()],
            },
            StormRecord {
                storm_name: "Tropical Storm Bridget".to_string(),
                content: vec!["Only one.".to_string()],
            },
        ]
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("stormharvest_{}_{name}.json", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_records_and_order() {
        let path = temp_path("roundtrip");
        let original = records();

        write_records(&original, &path).await.unwrap();
        let back = read_records(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(back, original);
    }

    #[tokio::test]
    async fn test_output_is_pretty_printed() {
        let path = temp_path("pretty");
        write_records(&records(), &path).await.unwrap();
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(contents.contains("\n  {"));
        assert!(contents.contains("\"storm_name\": \"Hurricane Agatha\""));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_error() {
        assert!(read_records("/nonexistent/stormharvest.json").await.is_err());
    }
}

//! Final CSV table of normalized storm rows.
//!
//! Column order and header names come from the [`StormRow`] field order. Date
//! fields still holding the `"N/A"` sentinel are blanked on the way out; the
//! file is fully rebuilt on every run.

use crate::models::{StormRow, NOT_AVAILABLE};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

const HEADER: [&str; 5] = [
    "hurricane_storm_name",
    "start_date",
    "end_date",
    "number_of_deaths",
    "list_of_areas_affected",
];

/// Render the rows as CSV text with a header and no index column.
pub fn render_table(rows: &[StormRow]) -> Result<String, Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if rows.is_empty() {
        // serialize() emits the header from the first row; keep it for empty runs.
        writer.write_record(HEADER)?;
    }
    for row in rows {
        let mut row = row.clone();
        if row.start_date == NOT_AVAILABLE {
            row.start_date.clear();
        }
        if row.end_date == NOT_AVAILABLE {
            row.end_date.clear();
        }
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Write the full table to `path`, replacing any previous contents.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_table(rows: &[StormRow], path: &str) -> Result<(), Box<dyn Error>> {
    let table = render_table(rows)?;
    fs::write(path, table).await?;
    info!(rows = rows.len(), "Wrote output table");
    Ok(())
}

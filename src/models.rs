//! Data models for scraped storm records and their extracted representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`StormRecord`]: One scraped section heading plus its paragraphs
//! - [`StormRow`]: A fully normalized output row for the CSV table
//! - [`FieldValue`]: A tagged decode of one loosely-typed model field
//! - [`RecordStatus`]: The per-record processing outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used for unusable storm names and unparseable dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default value for the areas-affected column when nothing was extracted.
pub const NOT_KNOWN: &str = "not known";

/// One storm section as scraped from the season page.
///
/// This is the intermediate-file schema: a heading's cleaned text plus the
/// cleaned paragraphs that followed it, in document order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StormRecord {
    /// The section heading text, e.g. "Hurricane Olivia".
    pub storm_name: String,
    /// The paragraphs under the heading, in order.
    pub content: Vec<String>,
}

/// One normalized row of the output table.
///
/// Field order here defines the CSV column order and header names.
/// `start_date`/`end_date` may still hold the `"N/A"` sentinel; the table
/// writer blanks it on the way out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StormRow {
    pub hurricane_storm_name: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_deaths: i64,
    pub list_of_areas_affected: String,
}

/// A single model-output field, decoded into the handful of shapes the model
/// actually produces.
///
/// The model's JSON reply is untrusted: a field may be missing, a string, a
/// number, a list, or something stranger. Decoding into this enum up front
/// means the normalizers match on shape once instead of re-inspecting
/// `serde_json::Value` at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The key was missing or explicitly null.
    Absent,
    Text(String),
    Number(f64),
    List(Vec<serde_json::Value>),
    /// Any other shape (nested object, bool).
    Other(serde_json::Value),
}

impl FieldValue {
    /// Look up `key` in a model reply and decode its shape.
    pub fn from_output(output: &serde_json::Value, key: &str) -> Self {
        match output.get(key) {
            None | Some(serde_json::Value::Null) => FieldValue::Absent,
            Some(serde_json::Value::String(s)) => FieldValue::Text(s.clone()),
            Some(serde_json::Value::Number(n)) => {
                FieldValue::Number(n.as_f64().unwrap_or_default())
            }
            Some(serde_json::Value::Array(items)) => FieldValue::List(items.clone()),
            Some(other) => FieldValue::Other(other.clone()),
        }
    }
}

/// Outcome of processing one storm record through the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// The model reply normalized into a row.
    Extracted,
    /// The record was unusable (sentinel name, or list-valued name field).
    SkippedUnusable,
    /// The API call or JSON parse failed after retries; record skipped.
    FailedSkipped,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordStatus::Extracted => "extracted",
            RecordStatus::SkippedUnusable => "skipped_unusable",
            RecordStatus::FailedSkipped => "failed_skipped",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storm_record_roundtrip() {
        let record = StormRecord {
            storm_name: "Hurricane Test".to_string(),
            content: vec!["First paragraph.".to_string(), "Second.".to_string()],
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: StormRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_storm_record_deserialization() {
        let json = r#"{
            "storm_name": "Tropical Storm Agatha",
            "content": ["One paragraph."]
        }"#;

        let record: StormRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.storm_name, "Tropical Storm Agatha");
        assert_eq!(record.content.len(), 1);
    }

    #[test]
    fn test_field_value_absent_for_missing_and_null() {
        let output = json!({"deaths": null});
        assert_eq!(FieldValue::from_output(&output, "deaths"), FieldValue::Absent);
        assert_eq!(FieldValue::from_output(&output, "missing"), FieldValue::Absent);
    }

    #[test]
    fn test_field_value_scalars() {
        let output = json!({"deaths": 12, "start_date": "September 1"});
        assert_eq!(
            FieldValue::from_output(&output, "deaths"),
            FieldValue::Number(12.0)
        );
        assert_eq!(
            FieldValue::from_output(&output, "start_date"),
            FieldValue::Text("September 1".to_string())
        );
    }

    #[test]
    fn test_field_value_list() {
        let output = json!({"areas_affected": ["Acapulco", "Baja California"]});
        match FieldValue::from_output(&output, "areas_affected") {
            FieldValue::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_field_value_other() {
        let output = json!({"deaths": {"estimate": 3}});
        assert!(matches!(
            FieldValue::from_output(&output, "deaths"),
            FieldValue::Other(_)
        ));
    }

    #[test]
    fn test_record_status_display() {
        assert_eq!(RecordStatus::Extracted.to_string(), "extracted");
        assert_eq!(RecordStatus::SkippedUnusable.to_string(), "skipped_unusable");
        assert_eq!(RecordStatus::FailedSkipped.to_string(), "failed_skipped");
    }
}

//! Normalization of untrusted model output into [`StormRow`]s.
//!
//! The model reply is a loose JSON object; each field is decoded into a
//! [`FieldValue`] and collapsed into the fixed output schema: dates become
//! `dd/mm/YYYY` or the `"N/A"` sentinel, death counts become non-negative
//! integers, and the areas field becomes a single string.

use crate::models::{FieldValue, StormRecord, StormRow, NOT_AVAILABLE, NOT_KNOWN};
use chrono::NaiveDate;
use tracing::debug;

/// The source pages never state a year, so one is spliced in before parsing.
pub const PLACEHOLDER_YEAR: i32 = 1975;

/// Parse a textual month/day value like "September 15" into `15/09/1975`.
///
/// Anything that is not parseable text yields the `"N/A"` sentinel, which the
/// table writer later blanks.
pub fn normalize_date(value: &FieldValue) -> String {
    let FieldValue::Text(text) = value else {
        return NOT_AVAILABLE.to_string();
    };
    match NaiveDate::parse_from_str(&format!("{text} {PLACEHOLDER_YEAR}"), "%B %d %Y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

/// Collapse a death-count field to a non-negative integer.
///
/// Strings, lists, nulls and missing values all become 0; only a numeric
/// value passes through.
pub fn normalize_deaths(value: &FieldValue) -> i64 {
    match value {
        FieldValue::Number(n) => (*n as i64).max(0),
        _ => 0,
    }
}

/// Collapse the areas-affected field to a single string.
///
/// Lists are joined with `", "`; empty or unusable values become the literal
/// `"not known"`.
pub fn normalize_areas(value: &FieldValue) -> String {
    let joined = match value {
        FieldValue::Text(s) => s.trim().to_string(),
        FieldValue::List(items) => items
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => s.to_string(),
                None => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };
    if joined.is_empty() {
        NOT_KNOWN.to_string()
    } else {
        joined
    }
}

/// Convert one model reply into a normalized row, or suppress the record.
///
/// A record is unusable when its scraped name is the `"N/A"` sentinel or when
/// the model returned a list for the name field; both return `None`. The row's
/// name column always carries the scraped name, not the model's echo of it.
pub fn build_row(record: &StormRecord, output: &serde_json::Value) -> Option<StormRow> {
    let model_name = FieldValue::from_output(output, "hurricane_storm_name");
    if record.storm_name == NOT_AVAILABLE || matches!(model_name, FieldValue::List(_)) {
        debug!(storm_name = %record.storm_name, "Unusable extraction; suppressing record");
        return None;
    }

    Some(StormRow {
        hurricane_storm_name: record.storm_name.clone(),
        start_date: normalize_date(&FieldValue::from_output(output, "start_date")),
        end_date: normalize_date(&FieldValue::from_output(output, "end_date")),
        number_of_deaths: normalize_deaths(&FieldValue::from_output(output, crate::prompt::DEATHS_KEY)),
        list_of_areas_affected: normalize_areas(&FieldValue::from_output(output, "areas_affected")),
    })
}

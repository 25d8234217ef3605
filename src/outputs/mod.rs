//! Output writers for the two pipeline stages.
//!
//! - [`json`]: the intermediate file of scraped [`StormRecord`]s, a
//!   pretty-printed UTF-8 JSON array. The scrape pipeline writes it, the
//!   extract pipeline reads it back; the two stages share nothing else.
//! - [`csv`]: the final five-column delimited table of normalized rows.
//!
//! [`StormRecord`]: crate::models::StormRecord

pub mod csv;
pub mod json;

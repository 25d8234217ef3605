//! Scrapers for storm-season listing pages.
//!
//! Each scraper follows a two-phase pattern:
//!
//! 1. **Fetching**: Download the season page HTML
//! 2. **Extraction**: Walk the document structure and group the paragraphs
//!    under each per-storm section heading into a [`StormRecord`]
//!
//! Currently the only source is Wikipedia season articles ([`wikipedia`]),
//! whose section structure (level-3 heading wrappers inside the body content
//! region) is stable across season pages.
//!
//! [`StormRecord`]: crate::models::StormRecord

pub mod wikipedia;

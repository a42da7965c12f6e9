//! Utility functions and helpers.
//!
//! - Path normalization into manifest form (`/`-separated, root-relative)
//! - Date stamps for the `generated` field
//!
//! # Examples
//!
//! ```
//! use content_manifest::utils::paths::to_manifest_path;
//! use std::path::Path;
//!
//! let rel = to_manifest_path(Path::new("content/maps/a.json"), Path::new("content"));
//! assert_eq!(rel.as_deref(), Some("maps/a.json"));
//! ```

/// Path manipulation and normalization utilities
pub mod paths;

use chrono::{Local, NaiveDate};

/// Format of the manifest's `generated` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns today's local date formatted as `YYYY-MM-DD`.
#[must_use]
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Formats a date the way the manifest stores it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

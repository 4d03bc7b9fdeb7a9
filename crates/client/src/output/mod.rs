//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value for output, using `pretty` for the human-readable form.
pub fn render<T, F>(value: &T, format: OutputFormat, pretty: F) -> String
where
    T: serde::Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}

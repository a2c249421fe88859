//! Coercion of raw command-line values into entry fields.

use crate::error::AppError;
use chrono::Local;
use serde_json::json;

/// Timestamp layout used for `date_collected` / `date_updated`.
///
/// Local time, microsecond precision, no offset: `2024-05-01T12:30:00.123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Returns the current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Splits a comma-joined value into its parts.
///
/// Parts are kept verbatim (no trimming), so `"a, b"` yields `["a", " b"]`.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Interprets a flag value: true only for a case-insensitive `"true"`.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Parses a rating value.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the value is not a finite number.
/// NaN and infinities have no JSON representation.
pub fn parse_rating(value: &str) -> Result<f64, AppError> {
    let invalid = |reason: String| {
        AppError::bad_request(
            format!("Invalid rating '{value}': {reason}"),
            json!({ "field": "rating", "value": value }),
        )
    };

    let rating = value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(e.to_string()))?;

    if !rating.is_finite() {
        return Err(invalid("not a finite number".to_string()));
    }

    Ok(rating)
}

/// Parses a rating count value.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the value is not a non-negative integer.
pub fn parse_rating_count(value: &str) -> Result<u64, AppError> {
    value.trim().parse::<u64>().map_err(|e| {
        AppError::bad_request(
            format!("Invalid rating count '{value}': {e}"),
            json!({ "field": "rating_count", "value": value }),
        )
    })
}

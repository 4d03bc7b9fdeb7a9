//! Serde helper functions for upstream API payloads.
//!
//! The biorhythm API is not strict about its JSON: dates sometimes carry a
//! time component, flags can be `null`, and decimal fields may be rendered as
//! strings. These helpers normalise those quirks at the parsing boundary.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parse a date that is either `YYYY-MM-DD` or an ISO-8601 datetime.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Deserialize a date, accepting both date-only and datetime strings.
pub fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_flexible_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
}

/// Deserialize an optional date, treating empty strings as None.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_flexible_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
        _ => Ok(None),
    }
}

/// Deserialize a boolean where `null` means false.
pub fn deserialize_null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Deserialize a number that may arrive as a JSON number, a numeric string or null.
///
/// `null` and empty strings become `0.0`.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s}"))),
    }
}

//! Lenient calendar dates
//!
//! Reads either a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, as sent
//! by the front end's date picker. A timestamp keeps the date written in its
//! own offset. Blank text reads as no date.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse(&text).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn parse(text: &str) -> Result<Option<NaiveDate>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|_| format!("Invalid date: {}", text))
}

//! Date helpers for session tables.
//!
//! The server sends Gregorian dates either as a plain `YYYY-MM-DD` or as a
//! full RFC 3339 timestamp. Tables show them as `dd/mm/yyyy` and date inputs
//! need the bare `YYYY-MM-DD` part.

use chrono::{DateTime, NaiveDate};

/// Value for an `<input type="date">`: everything before the `T`.
pub fn input_date(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}

fn parse(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(&input_date(raw), "%Y-%m-%d").ok()
}

/// Day-first display form (`01/03/2025`). Unparseable input is shown as is.
pub fn display_date(raw: &str) -> String {
    match parse(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

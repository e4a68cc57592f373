//! Field formatting and date/time parsing helpers.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AdifError, Result};

/// Parses an ADIF date, `YYYYMMDD`.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|source| AdifError::InvalidDate {
        value: text.to_string(),
        source,
    })
}

/// Parses an ADIF time, `HHMM` or `HHMMSS`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let fmt = if text.len() == 4 { "%H%M" } else { "%H%M%S" };
    NaiveTime::parse_from_str(text, fmt).map_err(|source| AdifError::InvalidTime {
        value: text.to_string(),
        source,
    })
}

/// Formats one field token, like `<adif_ver:5>3.1.2`.
///
/// The declared length counts characters, not bytes; that is what the
/// scanner consumes on the way back in.
pub fn make_field(name: &str, value: &str) -> String {
    format!("<{name}:{}>{value}", value.chars().count())
}

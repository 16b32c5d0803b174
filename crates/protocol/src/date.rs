//! Manual date entry in the canonical `YYYY-MM-DD` format.

use chrono::NaiveDate;

use crate::error::{ProtocolError, Result};

/// The `chrono` format string for manual date entry.
pub const MANUAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a complete `YYYY-MM-DD` entry.
const MANUAL_DATE_LEN: usize = 10;

/// Parses a manual date entry.
///
/// Only complete, zero-padded `YYYY-MM-DD` entries are accepted, so partial
/// input such as `2024-12-2` (on its way to `2024-12-25`) never commits a
/// premature date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::date::parse_manual_date;
///
/// assert_eq!(
///     parse_manual_date("2024-12-25"),
///     NaiveDate::from_ymd_opt(2024, 12, 25)
/// );
/// assert_eq!(parse_manual_date("2024-13-"), None);
/// assert_eq!(parse_manual_date("2024-02-30"), None);
/// ```
#[must_use]
pub fn parse_manual_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.len() != MANUAL_DATE_LEN {
        return None;
    }
    NaiveDate::parse_from_str(input, MANUAL_DATE_FORMAT).ok()
}

/// Strict variant of [`parse_manual_date`].
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidDate`] if the input is not a complete
/// `YYYY-MM-DD` date.
pub fn try_parse_manual_date(input: &str) -> Result<NaiveDate> {
    parse_manual_date(input).ok_or_else(|| ProtocolError::InvalidDate(input.to_string()))
}

/// Formats a date for the manual entry field.
#[must_use]
pub fn format_manual_date(date: NaiveDate) -> String {
    date.format(MANUAL_DATE_FORMAT).to_string()
}

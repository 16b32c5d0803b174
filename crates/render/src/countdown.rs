//! D-Day arithmetic and text.

use chrono::{NaiveDate, NaiveDateTime};

/// Signed number of calendar days from `target` to `today`.
///
/// Positive when the target is in the past, negative when it is still
/// ahead. Both dates are read in the same (local) calendar, so the result
/// does not depend on the time of day.
#[must_use]
pub fn day_offset(target: NaiveDate, today: NaiveDate) -> i64 {
    (today - target).num_days()
}

/// Formats an offset as `D+n` (today or past) or `D-n` (future).
///
/// # Examples
///
/// ```
/// use dday_render::countdown::label;
///
/// assert_eq!(label(5), "D+5");
/// assert_eq!(label(0), "D+0");
/// assert_eq!(label(-5), "D-5");
/// ```
#[must_use]
pub fn label(offset: i64) -> String {
    if offset >= 0 {
        format!("D+{offset}")
    } else {
        format!("D-{}", offset.unsigned_abs())
    }
}

/// The caption under the label: the current date as `MON DEC 1`.
#[must_use]
pub fn caption(now: NaiveDateTime) -> String {
    now.format("%a %b %-d").to_string().to_uppercase()
}

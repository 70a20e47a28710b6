//! Duration arithmetic for task totals.
//!
//! Totals are kept as separate hour and minute counters. Additions never
//! carry; [`normalize`] moves whole hours out of the minute counter once,
//! when a total is finalized.

use crate::error::{EngineError, EngineResult};

/// Parses `"H:MM"` duration text into hours and minutes.
///
/// The text is split on the first `:` and both halves are parsed as
/// integers after trimming whitespace. The minutes are not range-checked.
///
/// # Examples
///
/// ```
/// use report_engine::calculation::parse_duration;
///
/// assert_eq!(parse_duration("2:30").unwrap(), (2, 30));
/// assert_eq!(parse_duration("0:75").unwrap(), (0, 75));
/// assert!(parse_duration("2h").is_err());
/// ```
pub fn parse_duration(text: &str) -> EngineResult<(i64, i64)> {
    let (hours, minutes) = text.split_once(':').ok_or_else(|| EngineError::ParseError {
        value: text.to_string(),
        message: "expected a duration in H:MM form".to_string(),
    })?;

    let hours = hours
        .trim()
        .parse::<i64>()
        .map_err(|e| EngineError::ParseError {
            value: text.to_string(),
            message: format!("hours are not an integer: {}", e),
        })?;
    let minutes = minutes
        .trim()
        .parse::<i64>()
        .map_err(|e| EngineError::ParseError {
            value: text.to_string(),
            message: format!("minutes are not an integer: {}", e),
        })?;

    Ok((hours, minutes))
}

fn overflow(what: &str) -> EngineError {
    EngineError::Overflow {
        message: format!("{} do not fit a 64-bit counter", what),
    }
}

/// Adds a duration to running totals without normalizing.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if either counter overflows.
pub fn accumulate(
    total_hours: i64,
    total_minutes: i64,
    hours: i64,
    minutes: i64,
) -> EngineResult<(i64, i64)> {
    let hours = total_hours
        .checked_add(hours)
        .ok_or_else(|| overflow("hours"))?;
    let minutes = total_minutes
        .checked_add(minutes)
        .ok_or_else(|| overflow("minutes"))?;
    Ok((hours, minutes))
}

/// Carries whole hours out of the minute counter.
///
/// Uses floored division so the minute result is always in `0..60`.
///
/// # Examples
///
/// ```
/// use report_engine::calculation::normalize;
///
/// assert_eq!(normalize(1, 135).unwrap(), (3, 15));
/// assert_eq!(normalize(3, 15).unwrap(), (3, 15));
/// assert!(normalize(i64::MAX, 60).is_err());
/// ```
pub fn normalize(hours: i64, minutes: i64) -> EngineResult<(i64, i64)> {
    let hours = hours
        .checked_add(minutes.div_euclid(60))
        .ok_or_else(|| overflow("hours"))?;
    Ok((hours, minutes.rem_euclid(60)))
}

/// Formats hours and minutes as `"{h}h {m}m"`.
pub fn format_duration(hours: i64, minutes: i64) -> String {
    format!("{}h {}m", hours, minutes)
}

/// Formats a number of seconds as `"{h}h {m}m"`, dropping leftover seconds.
///
/// # Examples
///
/// ```
/// use report_engine::calculation::format_seconds;
///
/// assert_eq!(format_seconds(5400), "1h 30m");
/// assert_eq!(format_seconds(59), "0h 0m");
/// ```
pub fn format_seconds(seconds: u64) -> String {
    let total_minutes = seconds / 60;
    format_duration((total_minutes / 60) as i64, (total_minutes % 60) as i64)
}

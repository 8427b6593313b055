//! Byte sizes, durations and timestamps in human notation.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, Local, TimeZone};
use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};

static SIZE_NOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*([a-z])?").expect("literal pattern"));

const SIZE_SUFFIXES: [char; 5] = ['b', 'k', 'm', 'g', 't'];
const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Default `Y-m-d H:i:s` rendering.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse shorthand like `512`, `10k`, `2 M` into bytes (powers of 1024).
///
/// Only the leading number and the first letter after it count, so `10MB`
/// is ten mebibytes. Letters other than `b k m g t` multiply by one.
pub fn size_to_bytes(notation: &str) -> DomainResult<u64> {
    let invalid = || DomainError::InvalidSize(notation.to_string());
    let caps = SIZE_NOTATION.captures(notation.trim()).ok_or_else(invalid)?;
    let count: u64 = caps[1].parse().map_err(|_| invalid())?;

    let exponent = caps
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .and_then(|c| {
            SIZE_SUFFIXES
                .iter()
                .position(|&s| s == c.to_ascii_lowercase())
        })
        .unwrap_or(0) as u32;

    1024u64
        .checked_pow(exponent)
        .and_then(|factor| count.checked_mul(factor))
        .ok_or_else(invalid)
}

/// Render a byte count with the largest unit whose value stays at or above
/// `threshold`, rounded to `precision` decimals with trailing zeros dropped.
///
/// ```
/// use vvkit::domain::units::bytes_to_size;
///
/// assert_eq!(bytes_to_size(1536, 2, 0.9), "1.5KB");
/// assert_eq!(bytes_to_size(1000, 2, 0.9), "0.98KB");
/// ```
pub fn bytes_to_size(bytes: u64, precision: usize, threshold: f64) -> String {
    let mut value = bytes as f64;
    let mut unit = SIZE_UNITS[0];
    for next in &SIZE_UNITS[1..] {
        let scaled = value / 1024.0;
        if scaled < threshold {
            break;
        }
        value = scaled;
        unit = next;
    }
    format!("{}{}", trim_decimals(format!("{:.*}", precision, value)), unit)
}

fn trim_decimals(mut s: String) -> String {
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

/// Format seconds as `[-][D ]H:MM:SS[.fff]`.
///
/// With `include_days`, whole days are split off and hours wrap at 24.
/// `precision` is the number of fractional digits (at most 9); zero omits
/// the fraction.
pub fn sec_to_hms(seconds: f64, include_days: bool, precision: u32) -> String {
    let precision = precision.min(9);
    let negative = seconds < 0.0;
    let scale = 10u64.pow(precision);
    let total = (seconds.abs() * scale as f64).round() as u64;
    let (whole, fraction) = (total / scale, total % scale);

    let (days, hours) = if include_days {
        (whole / 86_400, whole % 86_400 / 3_600)
    } else {
        (0, whole / 3_600)
    };
    let minutes = whole % 3_600 / 60;
    let secs = whole % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{} ", days));
    }
    out.push_str(&format!("{}:{:02}:{:02}", hours, minutes, secs));
    if precision > 0 {
        out.push_str(&format!(".{:0width$}", fraction, width = precision as usize));
    }
    out
}

/// Reject `chrono` format strings with unknown or dangling specifiers.
pub fn validate_datetime_format(format: &str) -> DomainResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::InvalidFormat(format.to_string()));
    }
    Ok(())
}

/// Render a timestamp with a `chrono` format string.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>, format: &str) -> DomainResult<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    validate_datetime_format(format)?;
    let mut out = String::new();
    write!(out, "{}", dt.format(format))
        .map_err(|_| DomainError::InvalidFormat(format.to_string()))?;
    Ok(out)
}

/// Local time `offset_secs` from now (negative for the past).
pub fn datetime_from_now(offset_secs: i64, format: &str) -> DomainResult<String> {
    let at = Local::now() + Duration::seconds(offset_secs);
    format_datetime(&at, format)
}

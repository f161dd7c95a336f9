//! The date engine: auto-detecting parse, fixed-format rendering, timezone
//! resolution, arithmetic and diffing (spec.md §4.2 "Dates"). Every entry
//! point degrades to leaving the target path's current value untouched on
//! any parse failure, except `date_diff`, which spec.md calls out as
//! writing `Null` to `result_path` instead.

use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::path::Path;
use crate::traversal::{get, put, update};

pub fn default_format() -> String {
    "iso8601".to_string()
}

pub fn default_timezone() -> String {
    "UTC".to_string()
}

pub fn default_unit() -> String {
    "days".to_string()
}

fn resolve_tz(name: &str) -> Tz {
    Tz::from_str(name).unwrap_or(Tz::UTC)
}

/// Auto-detects a unix timestamp (seconds or milliseconds, by magnitude) or
/// an ISO-8601 string, in that order, and returns the instant in UTC.
fn parse_auto(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64()?;
            parse_unix_number(millis)
        }
        Value::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                return parse_unix_number(n);
            }
            parse_iso8601(s)
        }
        _ => None,
    }
}

fn parse_unix_number(n: i64) -> Option<DateTime<Utc>> {
    // Anything beyond ~ year 5138 in seconds is almost certainly milliseconds.
    if n.abs() > 100_000_000_000 {
        Utc.timestamp_millis_opt(n).single()
    } else {
        Utc.timestamp_opt(n, 0).single()
    }
}

fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

/// Renders `instant` in one of the 7 fixed output formats, using `tz`'s
/// wall-clock digits for everything except `unix`/`unix_ms`, which always
/// reflect the true UTC instant. The `Z`/`UTC` literal in the templated
/// formats is exactly that — a literal — it is not swapped for the
/// resolved timezone's offset (see DESIGN.md).
fn format_instant(instant: DateTime<Utc>, format: &str, tz: &Tz) -> Value {
    let local = instant.with_timezone(tz);
    match format {
        "iso8601" => Value::String(local.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        "iso8601_basic" => Value::String(local.format("%Y%m%dT%H%M%SZ").to_string()),
        "human" => Value::String(local.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        "date_only" => Value::String(local.format("%Y-%m-%d").to_string()),
        "time_only" => Value::String(local.format("%H:%M:%S").to_string()),
        "unix" => Value::from(instant.timestamp()),
        "unix_ms" => Value::from(instant.timestamp_millis()),
        _ => Value::String(local.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    }
}

pub fn current_timestamp(working: Value, path: &str, format: &str, timezone: &str) -> Value {
    let tz = resolve_tz(timezone);
    let rendered = format_instant(Utc::now(), format, &tz);
    put(working, &Path::parse(path), rendered)
}

pub fn format_date(working: Value, path: &str, format: &str) -> Value {
    let tz = resolve_tz("UTC");
    update(working, &Path::parse(path), &|v| match parse_auto(&v) {
        Some(instant) => format_instant(instant, format, &tz),
        None => v,
    })
}

pub fn parse_date(working: Value, path: &str, output_format: &str) -> Value {
    format_date(working, path, output_format)
}

fn add_duration(instant: DateTime<Utc>, amount: i64, unit: &str) -> Option<DateTime<Utc>> {
    let delta = match unit {
        "seconds" => Duration::seconds(amount),
        "minutes" => Duration::minutes(amount),
        "hours" => Duration::hours(amount),
        "days" => Duration::days(amount),
        "weeks" => Duration::weeks(amount),
        "months" => Duration::days(amount.checked_mul(30)?),
        "years" => Duration::days(amount.checked_mul(365)?),
        _ => return None,
    };
    instant.checked_add_signed(delta)
}

pub fn date_add(working: Value, path: &str, amount: i64, unit: &str, output_format: &str) -> Value {
    let tz = resolve_tz("UTC");
    update(working, &Path::parse(path), &|v| match parse_auto(&v) {
        Some(instant) => match add_duration(instant, amount, unit) {
            Some(shifted) => format_instant(shifted, output_format, &tz),
            None => v,
        },
        None => v,
    })
}

fn diff_value(a: DateTime<Utc>, b: DateTime<Utc>, unit: &str) -> Option<Value> {
    let delta = b.signed_duration_since(a);
    match unit {
        "seconds" => Some(Value::from(delta.num_seconds())),
        "minutes" => Some(Value::from(delta.num_seconds() as f64 / 60.0)),
        "hours" => Some(Value::from(delta.num_seconds() as f64 / 3600.0)),
        "days" => Some(Value::from(delta.num_seconds() as f64 / 86_400.0)),
        "weeks" => Some(Value::from(delta.num_seconds() as f64 / (86_400.0 * 7.0))),
        _ => None,
    }
}

pub fn date_diff(working: Value, from_path: &str, to_path: &str, result_path: &str, unit: &str) -> Value {
    let from = get(&working, &Path::parse(from_path));
    let to = get(&working, &Path::parse(to_path));
    let result = match (parse_auto(&from), parse_auto(&to)) {
        (Some(a), Some(b)) => diff_value(a, b, unit).unwrap_or(Value::Null),
        _ => Value::Null,
    };
    put(working, &Path::parse(result_path), result)
}

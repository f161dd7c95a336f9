//! The `transform` operator: applies a named pure function to the value at
//! `path` (spec.md §4.2 "Transform"). An unknown `function` name, or a
//! function applied to a value of the wrong shape, leaves the value
//! unchanged — the same identity-on-mismatch policy the rest of the
//! operator catalogue follows.

use serde_json::Value;

use crate::path::Path;
use crate::traversal::update;

pub fn transform(working: Value, path: &str, function: &str, args: &[Value]) -> Value {
    update(working, &Path::parse(path), &|v| apply_fn(function, &v, args))
}

fn apply_fn(function: &str, v: &Value, args: &[Value]) -> Value {
    match function {
        "uppercase" => str_map(v, |s| s.to_uppercase()),
        "lowercase" => str_map(v, |s| s.to_lowercase()),
        "capitalize" => str_map(v, capitalize),
        "trim" => str_map(v, |s| s.trim().to_string()),
        "reverse" => match v {
            Value::String(s) => Value::String(s.chars().rev().collect()),
            Value::Array(a) => Value::Array(a.iter().rev().cloned().collect()),
            other => other.clone(),
        },
        "string" => Value::String(to_display_string(v)),
        "number" => to_number(v),
        "integer" => match to_f64(v) {
            Some(f) => Value::from(f.trunc() as i64),
            None => Value::Null,
        },
        "float" => match to_f64(v) {
            Some(f) => Value::from(f),
            None => Value::Null,
        },
        "boolean" => Value::Bool(!is_falsy(v)),
        "length" => match v {
            Value::String(s) => Value::from(s.chars().count()),
            Value::Array(a) => Value::from(a.len()),
            Value::Object(m) => Value::from(m.len()),
            other => other.clone(),
        },
        "split" => match v {
            Value::String(s) => {
                let sep = string_arg(args, " ");
                Value::Array(
                    s.split(sep.as_str())
                        .map(|p| Value::String(p.to_string()))
                        .collect(),
                )
            }
            other => other.clone(),
        },
        "join" => match v {
            Value::Array(items) => {
                let sep = string_arg(args, " ");
                let parts: Vec<String> = items.iter().map(to_display_string).collect();
                Value::String(parts.join(&sep))
            }
            other => other.clone(),
        },
        "abs" => match to_f64(v) {
            Some(f) => num_from_f64(f.abs(), v),
            None => v.clone(),
        },
        "round" => match to_f64(v) {
            Some(f) => round_to(f, round_places(args)),
            None => v.clone(),
        },
        _ => v.clone(),
    }
}

/// The falsy set per the operator table: `false`, `null`, `""`, `0`/`0.0`,
/// and the strings `"false"`/`"False"`/`"FALSE"`/`"0"`. Everything else,
/// including empty arrays/objects, is truthy.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => !b,
        Value::Null => true,
        Value::String(s) => matches!(s.as_str(), "" | "false" | "False" | "FALSE" | "0"),
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        _ => false,
    }
}

fn string_arg(args: &[Value], default: &str) -> String {
    match args.first() {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

fn round_places(args: &[Value]) -> i32 {
    args.first().and_then(Value::as_i64).unwrap_or(0) as i32
}

fn round_to(f: f64, places: i32) -> Value {
    let factor = 10f64.powi(places);
    let rounded = (f * factor).round() / factor;
    if places <= 0 {
        Value::from(rounded as i64)
    } else {
        Value::from(rounded)
    }
}

fn str_map(v: &Value, f: impl Fn(&str) -> String) -> Value {
    match v {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn to_display_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parses as an integer when the text is integral, else as a real number;
/// a value that parses as neither is `Null`.
fn to_number(v: &Value) -> Value {
    match v {
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Value::from(i)
            } else if let Ok(f) = s.parse::<f64>() {
                Value::from(f)
            } else {
                Value::Null
            }
        }
        Value::Number(_) => v.clone(),
        _ => Value::Null,
    }
}

fn to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

fn num_from_f64(f: f64, original: &Value) -> Value {
    if matches!(original, Value::Number(n) if n.is_i64() || n.is_u64()) && f.fract() == 0.0 {
        Value::from(f as i64)
    } else {
        Value::from(f)
    }
}

//! Tolerant per-field coercion.
//!
//! These follow the number/string conversion rules of the host's scripting
//! runtime, because that is what wrote the data. Every function takes the
//! resolved value (`None` when no alias held a non-null value) and a
//! fallback, and never fails.

use serde_json::{Map, Value};

/// Numeric conversion with host-script semantics.
///
/// Numbers pass, booleans are 0/1, strings parse after trimming (the empty
/// string is 0), arrays convert through their string form. Objects and
/// non-finite results yield `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(_) => parse_numeric_str(&js_string(value)),
        Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // Rust accepts "inf"/"nan" spellings the host would reject; both end up
    // non-finite and are filtered by the caller.
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    trimmed.parse::<f64>().ok()
}

/// String form of any value, as the host's `String(value)` would print it.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Number or `fallback`.
pub fn number_or(value: Option<&Value>, fallback: f64) -> f64 {
    value.and_then(to_number).unwrap_or(fallback)
}

/// Non-negative whole number clamped into `u32`.
pub fn u32_or(value: Option<&Value>, fallback: u32) -> u32 {
    number_or(value, f64::from(fallback))
        .round()
        .clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Non-negative whole number clamped into `u64`.
pub fn u64_or(value: Option<&Value>, fallback: u64) -> u64 {
    number_or(value, fallback as f64).round().clamp(0.0, u64::MAX as f64) as u64
}

/// Non-empty strings verbatim; anything else is `fallback`.
pub fn string_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => fallback.to_string(),
    }
}

/// Coerce a list-ish value into strings.
///
/// - sequence: each element's string form, empties dropped, `fallback` if
///   nothing is left
/// - string: trimmed single entry, `fallback` if empty
/// - mapping: `"{key}: {value}"` for non-empty string values, else `"{key}"`;
///   an empty mapping yields an empty list, not `fallback`
pub fn string_list_or(value: Option<&Value>, fallback: &[String]) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => {
            let list: Vec<String> = items
                .iter()
                .map(js_string)
                .filter(|s| !s.is_empty())
                .collect();
            if list.is_empty() {
                fallback.to_vec()
            } else {
                list
            }
        }
        Some(Value::String(s)) => {
            let text = s.trim();
            if text.is_empty() {
                fallback.to_vec()
            } else {
                vec![text.to_string()]
            }
        }
        Some(Value::Object(map)) => mapping_entries(map),
        _ => fallback.to_vec(),
    }
}

fn mapping_entries(map: &Map<String, Value>) -> Vec<String> {
    map.iter()
        .map(|(key, item)| match item {
            Value::String(s) if !s.is_empty() => format!("{}: {}", key, s),
            _ => key.clone(),
        })
        .collect()
}

const TRUE_WORDS: &[&str] = &["true", "turn", "1", "yes", "on", "开启", "开", "是"];
const FALSE_WORDS: &[&str] = &["false", "0", "no", "off", "关闭", "关", "否", ""];

/// Boolean-ish flag as used by mode mappings.
pub fn is_enabled(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::String(s) => {
            let normalized = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&normalized.as_str()) {
                true
            } else if FALSE_WORDS.contains(&normalized.as_str()) {
                false
            } else {
                !normalized.is_empty()
            }
        }
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

//! Candidate extractors: ordered, pure field lookups over raw JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// How a money candidate encodes its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyUnit {
    /// Major currency units (kronor, euros).
    Major,
    /// Hundredths, divided by 100 on extraction.
    Cents,
}

/// Resolves a dotted path (`"invoice.bankgiro"`) against a JSON object.
/// `null` counts as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// First candidate that resolves to a non-empty string wins.
pub fn pick_str(value: &Value, candidates: &[&str]) -> Option<String> {
    for path in candidates {
        if let Some(v) = lookup(value, path) {
            if let Some(s) = v.as_str() {
                let s = s.trim();
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
    }
    None
}

/// Coerces a JSON value to a decimal. Numbers go through their exact string
/// representation; numeric strings are parsed directly.
pub fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Coerces a JSON value to an integer, accepting numeric strings.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First candidate that coerces to an integer wins.
pub fn pick_i64(value: &Value, candidates: &[&str]) -> Option<i64> {
    for path in candidates {
        if let Some(n) = lookup(value, path).and_then(as_i64) {
            return Some(n);
        }
    }
    None
}

/// First populated money candidate wins; cents candidates are divided by 100.
pub fn pick_money(value: &Value, candidates: &[(&str, MoneyUnit)]) -> Option<Decimal> {
    for (path, unit) in candidates {
        if let Some(amount) = lookup(value, path).and_then(as_decimal) {
            return Some(match unit {
                MoneyUnit::Major => amount,
                MoneyUnit::Cents => amount / Decimal::from(100),
            });
        }
    }
    None
}

/// Parses a timestamp from an RFC 3339 string or an epoch number.
/// Epoch values at or above 10^12 are taken as milliseconds.
pub fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let epoch = n.as_i64()?;
            if epoch >= 1_000_000_000_000 {
                DateTime::from_timestamp_millis(epoch)
            } else {
                DateTime::from_timestamp(epoch, 0)
            }
        }
        _ => None,
    }
}

/// First candidate that parses as a timestamp wins.
pub fn pick_datetime(value: &Value, candidates: &[&str]) -> Option<DateTime<Utc>> {
    for path in candidates {
        if let Some(dt) = lookup(value, path).and_then(as_datetime) {
            return Some(dt);
        }
    }
    None
}

/// First candidate that resolves to an array wins.
pub fn pick_array<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Vec<Value>> {
    for path in candidates {
        if let Some(arr) = lookup(value, path).and_then(Value::as_array) {
            return Some(arr);
        }
    }
    None
}

//! Lenient parsing of submitted fields
//!
//! The browser form does not always send the types we store: numbers can arrive as strings and
//! cleared inputs arrive as `""`. Unparsable values fall back to the field default instead of
//! rejecting the request. The visit date is the exception, it must be in one of the known shapes.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error as _;
use serde_json::Value;

/// Date-time shapes without a timezone, assumed to be UTC
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Date-only shape, midnight UTC
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Floor used when none (or garbage) is given
pub const DEFAULT_FLOOR: i64 = 1;

/// Parse a visit date
///
/// Accepted, in order:
/// - RFC 3339 with offset: `2025-09-05T14:30:00+02:00`
/// - without offset: `2025-09-05T14:30:00`
/// - without seconds: `2025-09-05T14:30`
/// - date only: `2025-09-05`
///
/// Empty and `null` mean "not visited yet"
pub fn parse_visit_date(value: &str) -> Result<Option<DateTime<Utc>>, String> {
    let value = value.trim();

    if value.is_empty() || value == "null" {
        return Ok(None);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(date_time.with_timezone(&Utc)));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(date_time.and_utc()));
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| format!("Invalid visit date: {value}"))
}

pub fn visit_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(value) => parse_visit_date(&value).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("Invalid visit date: {other}"))),
    }
}

pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_number(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn rating<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_integer(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn floor<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_integer(&Value::deserialize(deserializer)?).unwrap_or(DEFAULT_FLOOR))
}

pub fn default_floor() -> i64 {
    DEFAULT_FLOOR
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_flag(&Value::deserialize(deserializer)?))
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

/// Finite number from a JSON number or a numeric string
fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|number| number.is_finite())
}

/// Whole number from a JSON number or a numeric string, `4.0` counts, `4.5` does not
#[allow(clippy::cast_possible_truncation)]
fn to_integer(value: &Value) -> Option<i64> {
    if let Value::Number(number) = value {
        if let Some(integer) = number.as_i64() {
            return Some(integer);
        }
    }

    if let Value::String(integer) = value {
        if let Ok(integer) = integer.trim().parse::<i64>() {
            return Some(integer);
        }
    }

    to_number(value)
        .filter(|number| number.fract() == 0.0 && number.abs() < 9.0e15)
        .map(|number| number as i64)
}

/// Checkbox-ish truthiness
fn to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(flag) => matches!(
            flag.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        ),
        _ => false,
    }
}

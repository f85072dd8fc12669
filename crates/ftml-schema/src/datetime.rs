//! Date, time, datetime, and timestamp validation and coercion.
//!
//! Formats use strftime syntax; `"iso8601"` is a named alias for the
//! default lenient parsing of each type. Coercion into chrono types runs
//! only when a schema demands it; without a schema, dates stay strings and
//! timestamps stay integers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use ftml_tree::Value;

use crate::ast::ScalarType;
use crate::constraints;

/// Default strftime format for `date` values.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Default strftime format for `time` values (fraction optional).
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Integer timestamp precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPrecision {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimestampPrecision {
    /// Human name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TimestampPrecision::Seconds => "seconds",
            TimestampPrecision::Milliseconds => "milliseconds",
            TimestampPrecision::Microseconds => "microseconds",
            TimestampPrecision::Nanoseconds => "nanoseconds",
        }
    }

    /// Largest plausible value for this precision (end of year 9999).
    fn max_value(&self) -> i64 {
        match self {
            TimestampPrecision::Seconds => 253_402_300_799,
            TimestampPrecision::Milliseconds => 253_402_300_799_999,
            TimestampPrecision::Microseconds => 253_402_300_799_999_999,
            TimestampPrecision::Nanoseconds => i64::MAX,
        }
    }
}

impl std::str::FromStr for TimestampPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seconds" => Ok(TimestampPrecision::Seconds),
            "milliseconds" | "ms" => Ok(TimestampPrecision::Milliseconds),
            "microseconds" | "us" | "µs" => Ok(TimestampPrecision::Microseconds),
            "nanoseconds" | "ns" => Ok(TimestampPrecision::Nanoseconds),
            other => Err(format!(
                "unknown timestamp precision '{other}' (expected seconds, milliseconds, microseconds, or nanoseconds)"
            )),
        }
    }
}

/// Parse and validate a date string.
pub fn validate_date(s: &str, format: Option<&str>) -> Result<NaiveDate, String> {
    let fmt = match format {
        None | Some("iso8601") => DEFAULT_DATE_FORMAT,
        Some(fmt) => fmt,
    };
    NaiveDate::parse_from_str(s, fmt)
        .map_err(|_| format!("Invalid date '{s}' for format '{fmt}'"))
}

/// Parse and validate a time string.
pub fn validate_time(s: &str, format: Option<&str>) -> Result<NaiveTime, String> {
    let fmt = match format {
        None | Some("iso8601") => DEFAULT_TIME_FORMAT,
        Some(fmt) => fmt,
    };
    NaiveTime::parse_from_str(s, fmt)
        .map_err(|_| format!("Invalid time '{s}' for format '{fmt}'"))
}

/// Parse and validate a datetime string.
///
/// With no format, RFC 3339 / ISO 8601 with a `T` separator is required;
/// the `iso8601` alias additionally accepts a space separator and a missing
/// offset. Custom formats parse naively unless they contain an offset
/// directive.
pub fn validate_datetime(s: &str, format: Option<&str>) -> Result<DateTime<FixedOffset>, String> {
    match format {
        None => parse_datetime_strict(s)
            .ok_or_else(|| format!("Invalid datetime '{s}' for format 'iso8601'")),
        Some("iso8601") => parse_datetime_strict(s)
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(naive_to_utc)
            })
            .ok_or_else(|| format!("Invalid datetime '{s}' for format 'iso8601'")),
        Some(fmt) => {
            if fmt.contains("%z") || fmt.contains("%:z") || fmt.contains("%#z") {
                DateTime::parse_from_str(s, fmt)
                    .map_err(|_| format!("Invalid datetime '{s}' for format '{fmt}'"))
            } else {
                NaiveDateTime::parse_from_str(s, fmt)
                    .map(naive_to_utc)
                    .map_err(|_| format!("Invalid datetime '{s}' for format '{fmt}'"))
            }
        }
    }
}

fn parse_datetime_strict(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(naive_to_utc)
    })
}

fn naive_to_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

/// Validate an integer timestamp against a precision.
pub fn validate_timestamp(value: i64, precision: TimestampPrecision) -> Result<(), String> {
    if value < 0 {
        return Err(format!("Timestamp {value} is negative"));
    }
    if value > precision.max_value() {
        return Err(format!(
            "Timestamp {value} is too large for {} precision",
            precision.name()
        ));
    }
    Ok(())
}

/// Read the `precision` constraint of a timestamp type, defaulting to
/// seconds. Applicability checking already vetted the spelling.
pub(crate) fn timestamp_precision(t: &ScalarType) -> TimestampPrecision {
    constraints::string(&t.constraints, "precision")
        .and_then(|s| s.parse().ok())
        .unwrap_or(TimestampPrecision::Seconds)
}

/// Coerce a raw value into its schema-typed form, if the type demands it.
///
/// Returns `None` when no coercion applies (wrong type name or the value
/// doesn't parse; validation reports those separately).
pub fn coerce_value(value: &Value, t: &ScalarType) -> Option<Value> {
    let format = constraints::string(&t.constraints, "format");
    match (t.type_name.as_str(), value) {
        ("date", Value::String(s)) => validate_date(s, format).ok().map(Value::Date),
        ("time", Value::String(s)) => validate_time(s, format).ok().map(Value::Time),
        ("datetime", Value::String(s)) => validate_datetime(s, format).ok().map(Value::DateTime),
        ("timestamp", Value::Int(i)) => {
            validate_timestamp(*i, timestamp_precision(t)).ok()?;
            Some(Value::Timestamp(*i))
        }
        _ => None,
    }
}

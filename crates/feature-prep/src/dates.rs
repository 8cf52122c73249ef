//! Placeholder zeroing and order-date epoch conversion

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use order_table::Value;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S",
];

/// Replace every `"?"` with `Int(0)`, returning how many were replaced
pub fn zero_sentinels(values: &mut [Value]) -> usize {
    let mut replaced = 0;
    for value in values.iter_mut().filter(|v| v.is_sentinel()) {
        *value = Value::Int(0);
        replaced += 1;
    }
    replaced
}

/// Parse a calendar date or date-time as UTC
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Outcome of converting one cell
#[derive(Debug, Clone, PartialEq)]
pub enum EpochCell {
    /// Whole seconds since 1970-01-01T00:00:00Z
    Seconds(i64),
    /// Cell was missing
    Missing,
    /// Text no format accepts
    Unparseable,
}

/// Convert a cell to epoch seconds.
///
/// Numbers are read as nanoseconds since the epoch and floor-divided, so a
/// zeroed placeholder maps to the epoch itself.
pub fn epoch_seconds(value: &Value) -> EpochCell {
    match value {
        Value::Int(nanos) => EpochCell::Seconds(nanos.div_euclid(NANOS_PER_SECOND)),
        Value::Float(nanos) if nanos.is_finite() => {
            EpochCell::Seconds((nanos / NANOS_PER_SECOND as f64).floor() as i64)
        }
        Value::Float(_) | Value::Absent => EpochCell::Missing,
        Value::Text(s) => parse_timestamp(s)
            .map(|dt| EpochCell::Seconds(dt.and_utc().timestamp()))
            .unwrap_or(EpochCell::Unparseable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sentinels() {
        let mut values = vec![Value::from("?"), Value::Int(3), Value::from("x"), Value::Absent];
        assert_eq!(zero_sentinels(&mut values), 1);
        assert_eq!(
            values,
            vec![Value::Int(0), Value::Int(3), Value::from("x"), Value::Absent]
        );
    }

    #[test]
    fn test_epoch_from_dates() {
        assert_eq!(epoch_seconds(&Value::from("2020-01-01")), EpochCell::Seconds(1_577_836_800));
        assert_eq!(epoch_seconds(&Value::from("01.01.2020")), EpochCell::Seconds(1_577_836_800));
        assert_eq!(
            epoch_seconds(&Value::from("2020-01-01 00:01:30")),
            EpochCell::Seconds(1_577_836_890)
        );
        assert_eq!(
            epoch_seconds(&Value::from("2020-01-01T01:00:00+01:00")),
            EpochCell::Seconds(1_577_836_800)
        );
        assert_eq!(epoch_seconds(&Value::from("1969-12-31")), EpochCell::Seconds(-86_400));
    }

    #[test]
    fn test_epoch_from_numbers() {
        assert_eq!(epoch_seconds(&Value::Int(0)), EpochCell::Seconds(0));
        assert_eq!(epoch_seconds(&Value::Int(1_500_000_000)), EpochCell::Seconds(1));
        assert_eq!(epoch_seconds(&Value::Int(-1)), EpochCell::Seconds(-1));
        assert_eq!(epoch_seconds(&Value::Float(2.5e9)), EpochCell::Seconds(2));
        assert_eq!(epoch_seconds(&Value::Float(f64::NAN)), EpochCell::Missing);
    }

    #[test]
    fn test_epoch_missing_and_unparseable() {
        assert_eq!(epoch_seconds(&Value::Absent), EpochCell::Missing);
        assert_eq!(epoch_seconds(&Value::from("gestern")), EpochCell::Unparseable);
        assert_eq!(epoch_seconds(&Value::from("?")), EpochCell::Unparseable);
    }
}

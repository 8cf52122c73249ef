//! Order time of day as minutes past midnight

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use order_table::{Column, Value};

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S%.f"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

/// Parse a time of day, accepting a bare clock time or a full date-time
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.time())
        })
}

/// Minutes past midnight, ignoring seconds
pub fn minutes_past_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Minutes for every row.
///
/// The `"?"` placeholder, missing cells, numbers, and unparseable text all
/// come back as `None`. Also returns how many text cells failed to parse.
pub fn to_minutes(column: &Column) -> (Vec<Option<i64>>, usize) {
    let mut unparsed = 0;
    let minutes = column
        .values()
        .iter()
        .map(|value| match value {
            Value::Text(s) if !value.is_sentinel() => {
                let parsed = parse_time_of_day(s).map(minutes_past_midnight);
                if parsed.is_none() {
                    unparsed += 1;
                }
                parsed
            }
            _ => None,
        })
        .collect();
    (minutes, unparsed)
}

/// Mean of the parsed minutes, `None` when nothing parsed
pub fn mean_minutes(minutes: &[Option<i64>]) -> Option<f64> {
    let present: Vec<f64> = minutes.iter().flatten().map(|&m| m as f64).collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Cells for the output column: parsed minutes as `Int`, gaps as `Float(fill)`
pub fn fill_minutes(minutes: &[Option<i64>], fill: f64) -> Vec<Value> {
    minutes
        .iter()
        .map(|m| match m {
            Some(m) => Value::Int(*m),
            None => Value::Float(fill),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let at = |s| parse_time_of_day(s).map(minutes_past_midnight);
        assert_eq!(at("14:30"), Some(870));
        assert_eq!(at("14:30:59"), Some(870));
        assert_eq!(at("00:05:00.250"), Some(5));
        assert_eq!(at("2020-01-01 23:59:00"), Some(1439));
        assert_eq!(at(" 08:15 "), Some(495));
        assert_eq!(at("25:00"), None);
        assert_eq!(at("abends"), None);
    }

    #[test]
    fn test_to_minutes_coerces() {
        let column = Column::new(
            "TIME_ORDER",
            vec![
                Value::from("10:00"),
                Value::from("?"),
                Value::from("bogus"),
                Value::Int(5),
                Value::Absent,
            ],
        );
        let (minutes, unparsed) = to_minutes(&column);
        assert_eq!(minutes, vec![Some(600), None, None, None, None]);
        assert_eq!(unparsed, 1);
    }

    #[test]
    fn test_mean_and_fill() {
        let minutes = vec![Some(600), None, Some(700)];
        let mean = mean_minutes(&minutes).unwrap();
        assert!((mean - 650.0).abs() < 1e-9);
        assert_eq!(
            fill_minutes(&minutes, mean),
            vec![Value::Int(600), Value::Float(650.0), Value::Int(700)]
        );
    }

    #[test]
    fn test_mean_undefined_when_empty() {
        assert_eq!(mean_minutes(&[None, None]), None);
        assert_eq!(mean_minutes(&[]), None);
    }
}

//! Birthdate to age derivation

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use order_table::Value;

const BIRTHDATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Turns a birthdate cell into an age in whole years
pub trait AgeCalculator: Send + Sync {
    /// Age for one cell, `None` when the cell holds no usable date
    fn age(&self, birthdate: &Value) -> Option<i64>;
}

impl<F> AgeCalculator for F
where
    F: Fn(&Value) -> Option<i64> + Send + Sync,
{
    fn age(&self, birthdate: &Value) -> Option<i64> {
        self(birthdate)
    }
}

/// Counts completed birthdays up to a reference date.
///
/// Someone born on 29 February turns a year older on 1 March in non-leap
/// years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAge {
    as_of: NaiveDate,
}

impl CalendarAge {
    /// Ages as of `as_of`
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Ages as of today (UTC)
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// Reference date
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Whole years between `birth` and the reference date
    pub fn years_since(&self, birth: NaiveDate) -> i64 {
        let mut years = i64::from(self.as_of.year() - birth.year());
        if (self.as_of.month(), self.as_of.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        years
    }
}

impl AgeCalculator for CalendarAge {
    fn age(&self, birthdate: &Value) -> Option<i64> {
        let text = birthdate.as_str()?;
        parse_birthdate(text).map(|birth| self.years_since(birth))
    }
}

fn parse_birthdate(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    BIRTHDATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_boundary() {
        let calc = CalendarAge::new(date(2024, 6, 15));
        assert_eq!(calc.age(&Value::from("1990-06-15")), Some(34));
        assert_eq!(calc.age(&Value::from("1990-06-16")), Some(33));
        assert_eq!(calc.age(&Value::from("15.06.1990")), Some(34));
        assert_eq!(calc.age(&Value::from("1990-06-14 12:00:00")), Some(34));
    }

    #[test]
    fn test_leap_day_birthday() {
        let born = Value::from("2000-02-29");
        assert_eq!(CalendarAge::new(date(2023, 2, 28)).age(&born), Some(22));
        assert_eq!(CalendarAge::new(date(2023, 3, 1)).age(&born), Some(23));
        assert_eq!(CalendarAge::new(date(2024, 2, 29)).age(&born), Some(24));
    }

    #[test]
    fn test_unusable_birthdates() {
        let calc = CalendarAge::new(date(2024, 1, 1));
        assert_eq!(calc.age(&Value::from("?")), None);
        assert_eq!(calc.age(&Value::Absent), None);
        assert_eq!(calc.age(&Value::Int(1990)), None);
        assert_eq!(calc.age(&Value::from("1990-13-01")), None);
    }

    #[test]
    fn test_closure_calculator() {
        let fixed = |_: &Value| Some(42);
        assert_eq!(fixed.age(&Value::Absent), Some(42));
    }
}

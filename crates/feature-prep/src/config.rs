//! Preprocessing configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What to fill `TIME_ORDER` with when no row has a parseable time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTimePolicy {
    /// Fill every row with 0.0 (midnight)
    #[default]
    FillZero,
    /// Abort the call
    Fail,
}

/// What to do with an order date no known format accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateParsePolicy {
    /// Abort the call, naming the row and value
    #[default]
    Fail,
    /// Leave the cell absent
    Coerce,
}

/// What to do with a category the supplied vocabulary has never seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Abort the call
    #[default]
    Error,
    /// All-zero indicators for one-hot columns, code -1 for label columns
    Ignore,
}

/// Preprocessing configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Date ages are computed against (today, UTC, when unset)
    pub reference_date: Option<NaiveDate>,

    /// All-missing `TIME_ORDER` handling
    pub empty_time_policy: EmptyTimePolicy,

    /// Unparseable `DATE_LORDER` handling
    pub date_parse_policy: DateParsePolicy,

    /// Unseen categories when transforming with a vocabulary
    pub handle_unknown: HandleUnknown,
}

impl PreprocessConfig {
    /// Fail on every questionable input
    pub fn strict() -> Self {
        Self {
            empty_time_policy: EmptyTimePolicy::Fail,
            date_parse_policy: DateParsePolicy::Fail,
            handle_unknown: HandleUnknown::Error,
            ..Default::default()
        }
    }

    /// Coerce instead of failing wherever a fallback exists
    pub fn lenient() -> Self {
        Self {
            empty_time_policy: EmptyTimePolicy::FillZero,
            date_parse_policy: DateParsePolicy::Coerce,
            handle_unknown: HandleUnknown::Ignore,
            ..Default::default()
        }
    }

    /// Pin the age reference date
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

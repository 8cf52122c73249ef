//! One-hot expansion of categorical columns

use crate::config::HandleUnknown;
use crate::error::PreprocessError;
use order_table::{Column, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Textual form of a missing cell
const MISSING: &str = "nan";

/// Categories learned for one source column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotCategories {
    /// Source column name
    pub column: String,
    /// Distinct textual values, sorted
    pub values: Vec<String>,
    /// Whether a missing cell was seen and no `"nan"` text category exists;
    /// it then gets its own trailing `_nan` indicator
    pub absent: bool,
}

impl OneHotCategories {
    /// Learn the categories present in `column`
    pub fn fit(column: &Column) -> Self {
        let mut values = BTreeSet::new();
        let mut absent = false;
        for value in column.values() {
            if value.is_absent() {
                absent = true;
            } else {
                values.insert(value.to_text().into_owned());
            }
        }
        let mut categories = Self {
            column: column.name().to_string(),
            values: values.into_iter().collect(),
            absent,
        };
        categories.normalize();
        categories
    }

    /// Sort and dedup the categories and fold a missing cell into an
    /// existing `"nan"` category, so indicator names stay unique
    pub(crate) fn normalize(&mut self) {
        self.values.sort_unstable();
        self.values.dedup();
        if self.absent && self.values.binary_search_by(|v| Ord::cmp(v.as_str(), MISSING)).is_ok() {
            self.absent = false;
        }
    }

    /// Number of indicator columns produced
    pub fn width(&self) -> usize {
        self.values.len() + usize::from(self.absent)
    }

    /// Indicator column names, in output order
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .values
            .iter()
            .map(|v| format!("{}_{}", self.column, v))
            .collect();
        if self.absent {
            names.push(format!("{}_{}", self.column, MISSING));
        }
        names
    }

    fn slot(&self, value: &Value) -> Option<usize> {
        if value.is_absent() && self.absent {
            return Some(self.values.len());
        }
        let text = value.to_text();
        self.values
            .binary_search_by(|v| Ord::cmp(v.as_str(), &*text))
            .ok()
    }

    /// Expand `column` into one 0/1 column per category.
    ///
    /// With `HandleUnknown::Ignore`, a value outside the categories leaves its
    /// row all zero.
    pub fn expand(
        &self,
        column: &Column,
        handle_unknown: HandleUnknown,
    ) -> Result<Vec<Column>, PreprocessError> {
        let width = self.width();
        let mut indicators = vec![vec![Value::Int(0); column.len()]; width];
        let mut unknown = 0usize;

        for (row, value) in column.values().iter().enumerate() {
            match self.slot(value) {
                Some(slot) => indicators[slot][row] = Value::Int(1),
                None => match handle_unknown {
                    HandleUnknown::Error => {
                        return Err(PreprocessError::UnknownCategory {
                            column: self.column.clone(),
                            row,
                            value: value.to_text().into_owned(),
                        })
                    }
                    HandleUnknown::Ignore => unknown += 1,
                },
            }
        }

        if unknown > 0 {
            warn!(
                "{}: {} rows with unseen categories encoded as all zeros",
                self.column, unknown
            );
        }

        Ok(self
            .feature_names()
            .into_iter()
            .zip(indicators)
            .map(|(name, values)| Column::new(name, values))
            .collect())
    }
}

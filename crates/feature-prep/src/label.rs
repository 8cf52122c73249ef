//! Label encoding of flag and check columns

use crate::config::HandleUnknown;
use crate::error::PreprocessError;
use order_table::{Column, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Code assigned to unseen values under `HandleUnknown::Ignore`
const UNKNOWN_CODE: i64 = -1;

/// Integer codes learned for one column.
///
/// The code of a value is its index in `classes`, which is sorted by the
/// textual representation of the values seen during fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCodes {
    /// Column name
    pub column: String,
    /// Distinct textual values, sorted
    pub classes: Vec<String>,
}

impl LabelCodes {
    /// Learn the codes for `column`
    pub fn fit(column: &Column) -> Self {
        let classes: BTreeSet<String> = column
            .values()
            .iter()
            .map(|v| v.to_text().into_owned())
            .collect();
        Self {
            column: column.name().to_string(),
            classes: classes.into_iter().collect(),
        }
    }

    /// Sort and dedup the classes so codes follow text order
    pub(crate) fn normalize(&mut self) {
        self.classes.sort_unstable();
        self.classes.dedup();
    }

    /// Code for a single value
    pub fn code(&self, value: &Value) -> Option<i64> {
        let text = value.to_text();
        self.classes
            .binary_search_by(|c| Ord::cmp(c.as_str(), &*text))
            .ok()
            .map(|idx| idx as i64)
    }

    /// Replace every value of `column` with its code
    pub fn encode(
        &self,
        column: &Column,
        handle_unknown: HandleUnknown,
    ) -> Result<Vec<Value>, PreprocessError> {
        let mut unknown = 0usize;
        let codes = column
            .values()
            .iter()
            .enumerate()
            .map(|(row, value)| match (self.code(value), handle_unknown) {
                (Some(code), _) => Ok(Value::Int(code)),
                (None, HandleUnknown::Ignore) => {
                    unknown += 1;
                    Ok(Value::Int(UNKNOWN_CODE))
                }
                (None, HandleUnknown::Error) => Err(PreprocessError::UnknownCategory {
                    column: self.column.clone(),
                    row,
                    value: value.to_text().into_owned(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if unknown > 0 {
            warn!("{}: {} unseen values encoded as {}", self.column, unknown, UNKNOWN_CODE);
        }
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_codes_follow_sorted_text() {
        let column = Column::new(
            "CHK_IP",
            vec![Value::from("ja"), Value::from("nein"), Value::from("?"), Value::from("ja")],
        );
        let codes = LabelCodes::fit(&column);
        assert_eq!(codes.classes, vec!["?", "ja", "nein"]);
        let encoded = codes.encode(&column, HandleUnknown::Error).unwrap();
        assert_eq!(
            encoded,
            vec![Value::Int(1), Value::Int(2), Value::Int(0), Value::Int(1)]
        );
    }

    #[test]
    fn test_mixed_types_not_unified() {
        let column = Column::new(
            "NEUKUNDE",
            vec![Value::Int(1), Value::Float(1.0), Value::from("1"), Value::Absent],
        );
        let codes = LabelCodes::fit(&column);
        assert_eq!(codes.classes, vec!["1", "1.0", "nan"]);
        assert_eq!(codes.code(&Value::Int(1)), codes.code(&Value::from("1")));
        assert_ne!(codes.code(&Value::Int(1)), codes.code(&Value::Float(1.0)));
    }

    #[test]
    fn test_unknown_values() {
        let codes = LabelCodes::fit(&Column::new("B_EMAIL", vec![Value::from("ja")]));
        let batch = Column::new("B_EMAIL", vec![Value::from("ja"), Value::from("nein")]);

        assert!(matches!(
            codes.encode(&batch, HandleUnknown::Error),
            Err(PreprocessError::UnknownCategory { row: 1, .. })
        ));
        assert_eq!(
            codes.encode(&batch, HandleUnknown::Ignore).unwrap(),
            vec![Value::Int(0), Value::Int(-1)]
        );
    }

    #[test]
    fn test_normalize_unsorted_classes() {
        let mut codes = LabelCodes {
            column: "CHK_IP".into(),
            classes: vec!["nein".into(), "ja".into(), "nein".into()],
        };
        codes.normalize();
        assert_eq!(codes.classes, vec!["ja", "nein"]);
        assert_eq!(codes.code(&Value::from("nein")), Some(1));
    }

    proptest! {
        #[test]
        fn prop_codes_are_bijection(words in prop::collection::vec("[a-e]{0,2}", 1..50)) {
            let column = Column::new("FLAG", words.iter().map(|w| Value::from(w.as_str())).collect());
            let codes = LabelCodes::fit(&column);
            let encoded = codes.encode(&column, HandleUnknown::Error).unwrap();

            let k = codes.classes.len() as i64;
            let seen: BTreeSet<i64> = encoded.iter().filter_map(Value::as_i64).collect();
            prop_assert_eq!(seen, (0..k).collect::<BTreeSet<_>>());

            for (word, code) in words.iter().zip(&encoded) {
                let idx = code.as_i64().unwrap() as usize;
                prop_assert_eq!(&codes.classes[idx], word);
            }
        }
    }
}

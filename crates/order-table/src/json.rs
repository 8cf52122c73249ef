//! JSON Record Ingestion

use crate::error::TableError;
use crate::table::{Column, Table};
use crate::value::Value;
use serde_json::{Map, Number};
use tracing::debug;

impl Value {
    /// Type a JSON scalar. Booleans keep the `True`/`False` spelling of the
    /// upstream export.
    fn from_json(json: &serde_json::Value, column: &str, row: usize) -> Result<Self, TableError> {
        match json {
            serde_json::Value::Null => Ok(Value::Absent),
            serde_json::Value::Bool(b) => Ok(Value::Text(if *b { "True" } else { "False" }.into())),
            serde_json::Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Array(_) => Err(TableError::UnsupportedValue {
                column: column.to_string(),
                row,
                kind: "array",
            }),
            serde_json::Value::Object(_) => Err(TableError::UnsupportedValue {
                column: column.to_string(),
                row,
                kind: "object",
            }),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => serde_json::Value::Number((*v).into()),
            Value::Float(v) => Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Absent => serde_json::Value::Null,
        }
    }
}

impl Table {
    /// Parse a JSON array of objects into a table
    pub fn from_json_records(input: &str) -> Result<Self, TableError> {
        let records: Vec<Map<String, serde_json::Value>> = serde_json::from_str(input)?;
        Self::from_records(&records)
    }

    /// Build a table from JSON objects.
    ///
    /// Columns appear in first-seen key order; a key missing from a record
    /// is an absent cell.
    pub fn from_records(records: &[Map<String, serde_json::Value>]) -> Result<Self, TableError> {
        let mut names: Vec<&str> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }

        let mut table = Table::with_rows(records.len());
        for name in names {
            let values = records
                .iter()
                .enumerate()
                .map(|(row, record)| match record.get(name) {
                    Some(json) => Value::from_json(json, name, row),
                    None => Ok(Value::Absent),
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.push_column(Column::new(name, values))?;
        }

        debug!(
            "Loaded {} records with {} columns",
            table.n_rows(),
            table.n_cols()
        );
        Ok(table)
    }

    /// Emit the table as a JSON array of objects in column order
    pub fn to_json_records(&self) -> serde_json::Value {
        let rows = (0..self.n_rows())
            .map(|row| {
                let record: Map<String, serde_json::Value> = self
                    .columns()
                    .iter()
                    .map(|c| {
                        let cell = c.get(row).map(Value::to_json).unwrap_or_default();
                        (c.name().to_string(), cell)
                    })
                    .collect();
                serde_json::Value::Object(record)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_typed_once() {
        let table = Table::from_json_records(
            r#"[{"A": 1, "B": "?", "C": 2.5},
                {"A": null, "B": "x", "D": true}]"#,
        )
        .unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(table.get(0, "A"), Some(&Value::Int(1)));
        assert!(table.get(0, "B").unwrap().is_sentinel());
        assert_eq!(table.get(0, "C"), Some(&Value::Float(2.5)));
        assert_eq!(table.get(1, "A"), Some(&Value::Absent));
        assert_eq!(table.get(1, "C"), Some(&Value::Absent));
        assert_eq!(table.get(1, "D"), Some(&Value::from("True")));
    }

    #[test]
    fn test_nested_values_rejected() {
        let result = Table::from_json_records(r#"[{"A": [1, 2]}]"#);
        assert!(matches!(
            result,
            Err(TableError::UnsupportedValue { kind: "array", .. })
        ));
    }

    #[test]
    fn test_not_records() {
        assert!(matches!(
            Table::from_json_records("{}"),
            Err(TableError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_emit_records() {
        let table = Table::from_json_records(r#"[{"A": 1, "B": null}]"#).unwrap();
        let json = table.to_json_records();
        assert_eq!(json[0]["A"], serde_json::json!(1));
        assert!(json[0]["B"].is_null());
    }
}

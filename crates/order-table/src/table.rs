//! Row-Ordered Table

use crate::error::TableError;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a column from a name and its cells
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells in row order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Mutable cells in row order
    pub fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    /// Consume the column, returning its cells
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at `row`
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }
}

/// Ordered columns sharing one row count.
///
/// Row `i` of every column belongs to the same record; nothing in this crate
/// reorders rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with `n_rows` rows and no columns yet
    pub fn with_rows(n_rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            n_rows,
        }
    }

    /// Build a table from columns, checking names and lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut table = Self::with_rows(n_rows);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable columns in order; cells can change but names and lengths cannot
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Index of the named column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether the named column exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Borrow the named column
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Mutably borrow the named column
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Borrow the named column or fail with `MissingColumn`
    pub fn require(&self, name: &str) -> Result<&Column, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Mutably borrow the named column or fail with `MissingColumn`
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Column, TableError> {
        self.column_mut(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Cell at (`row`, `name`)
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|c| c.get(row))
    }

    /// Append a column at the end
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        self.check(&column)?;
        self.columns.push(column);
        Ok(())
    }

    /// Remove the named column, returning it
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.position(name)?;
        Some(self.columns.remove(idx))
    }

    /// Swap the cells of an existing column, keeping its position
    pub fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        if values.len() != self.n_rows {
            return Err(TableError::LengthMismatch {
                name: name.to_string(),
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.require_mut(name)?.values = values;
        Ok(())
    }

    fn check(&mut self, column: &Column) -> Result<(), TableError> {
        if self.contains(&column.name) {
            return Err(TableError::DuplicateColumn(column.name.clone()));
        }
        if self.columns.is_empty() && self.n_rows == 0 {
            self.n_rows = column.len();
        }
        if column.len() != self.n_rows {
            return Err(TableError::LengthMismatch {
                name: column.name.clone(),
                expected: self.n_rows,
                actual: column.len(),
            });
        }
        Ok(())
    }
}

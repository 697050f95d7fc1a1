//! In-memory tabular data shared by loaders and cleaners.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LifexError, Result};

/// A single table value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Raw text.
    Text(String),
}

impl Cell {
    /// Convert a JSON value into a cell.
    ///
    /// Nested arrays and objects are kept as their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Text(b.to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Integer(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content as f64, if finite.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Integer(i) => *i as f64,
            Cell::Float(f) => *f,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(i) => write!(f, "{}", i),
            // Whole floats keep one fractional digit ("81.0", not "81").
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Integer(i)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

/// Column-oriented table with ordered, named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: IndexMap<String, Vec<Cell>>,
    rows: usize,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from row-major data.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = DataTable::new();
        let width = headers.len();
        let mut columns: Vec<Vec<Cell>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(LifexError::Schema(format!(
                    "row {} has {} values, expected {}",
                    row_idx + 1,
                    row.len(),
                    width
                )));
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.push(cell);
            }
        }

        for (name, values) in headers.into_iter().zip(columns) {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Get a column by position.
    pub fn column_at(&self, index: usize) -> Option<(&str, &[Cell])> {
        self.columns
            .get_index(index)
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.rows {
            return None;
        }
        Some(self.columns.values().map(|c| &c[index]).collect())
    }

    /// Append a column at the end.
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(LifexError::Schema(format!("duplicate column '{}'", name)));
        }
        if !self.columns.is_empty() && values.len() != self.rows {
            return Err(LifexError::Schema(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        self.rows = values.len();
        self.columns.insert(name, values);
        Ok(())
    }

    /// Remove a column, preserving the order of the others.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Cell>> {
        let removed = self.columns.shift_remove(name);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        removed
    }

    /// Rename a column in place, keeping its position.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return if self.has_column(from) {
                Ok(())
            } else {
                Err(LifexError::Schema(format!("column '{}' not found", from)))
            };
        }
        if self.has_column(to) {
            return Err(LifexError::Schema(format!("duplicate column '{}'", to)));
        }
        let index = self
            .columns
            .get_index_of(from)
            .ok_or_else(|| LifexError::Schema(format!("column '{}' not found", from)))?;
        let (_, values) = self
            .columns
            .shift_remove_index(index)
            .ok_or_else(|| LifexError::Schema(format!("column '{}' not found", from)))?;
        self.columns.shift_insert(index, to.to_string(), values);
        Ok(())
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mask: Vec<bool> = (0..self.rows).map(&mut keep).collect();
        for values in self.columns.values_mut() {
            let mut i = 0;
            values.retain(|_| {
                let k = mask[i];
                i += 1;
                k
            });
        }
        self.rows = mask.iter().filter(|&&k| k).count();
    }

    /// Consume the table into its ordered columns.
    pub fn into_columns(self) -> IndexMap<String, Vec<Cell>> {
        self.columns
    }
}

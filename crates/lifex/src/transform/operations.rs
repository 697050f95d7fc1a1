//! Table operations that cleaners are composed of.

use serde::{Deserialize, Serialize};

use crate::error::{LifexError, Result};
use crate::input::{Cell, DataTable};

use super::coerce::{lenient_float, parse_year, strict_float};

/// A transformation step applied to a whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformOperation {
    /// Split the first column's name and cells on a delimiter into several columns.
    SplitComposite { delimiter: char },

    /// Rename a column, keeping its position.
    Rename { from: String, to: String },

    /// Drop columns; names that are not present are ignored.
    DropColumns { columns: Vec<String> },

    /// Stack every non-identifier column into name/value pairs.
    Unpivot {
        id_columns: Vec<String>,
        var_name: String,
        value_name: String,
    },

    /// Convert a column to integer years; any failure is a schema error.
    ParseYear { column: String },

    /// Convert a column to floats, extracting the numeric token from text.
    /// Rows without a token are dropped.
    ExtractNumeric { column: String },

    /// Keep only finite numeric cells, widened to floats. Other rows are dropped.
    RequireNumeric { column: String },

    /// Keep rows whose text cell equals `value`.
    FilterEquals { column: String, value: String },
}

impl TransformOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            TransformOperation::SplitComposite { delimiter } => {
                format!("Split composite key column on '{}'", delimiter)
            }
            TransformOperation::Rename { from, to } => format!("Rename '{}' → '{}'", from, to),
            TransformOperation::DropColumns { columns } => format!("Drop {:?}", columns),
            TransformOperation::Unpivot {
                id_columns,
                var_name,
                value_name,
            } => format!(
                "Unpivot by {:?} into '{}'/'{}'",
                id_columns, var_name, value_name
            ),
            TransformOperation::ParseYear { column } => format!("Parse '{}' as year", column),
            TransformOperation::ExtractNumeric { column } => {
                format!("Extract numeric values in '{}'", column)
            }
            TransformOperation::RequireNumeric { column } => {
                format!("Require numeric values in '{}'", column)
            }
            TransformOperation::FilterEquals { column, value } => {
                format!("Keep rows where '{}' = '{}'", column, value)
            }
        }
    }

    /// Apply the operation, consuming the input table.
    pub fn apply(&self, table: DataTable) -> Result<DataTable> {
        match self {
            TransformOperation::SplitComposite { delimiter } => split_composite(table, *delimiter),
            TransformOperation::Rename { from, to } => {
                let mut table = table;
                table.rename_column(from, to)?;
                Ok(table)
            }
            TransformOperation::DropColumns { columns } => {
                let mut table = table;
                for column in columns {
                    table.remove_column(column);
                }
                Ok(table)
            }
            TransformOperation::Unpivot {
                id_columns,
                var_name,
                value_name,
            } => unpivot(table, id_columns, var_name, value_name),
            TransformOperation::ParseYear { column } => parse_year_column(table, column),
            TransformOperation::ExtractNumeric { column } => {
                coerce_float_column(table, column, lenient_float)
            }
            TransformOperation::RequireNumeric { column } => {
                coerce_float_column(table, column, strict_float)
            }
            TransformOperation::FilterEquals { column, value } => {
                filter_equals(table, column, value)
            }
        }
    }
}

/// Result of applying a sequence of operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResult {
    /// Number of operations applied.
    pub operations_applied: usize,

    /// Per-operation row accounting.
    pub changes: Vec<TransformChange>,
}

/// Row accounting for one applied operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Description of the operation.
    pub description: String,

    /// Rows before the operation.
    pub rows_before: usize,

    /// Rows after the operation.
    pub rows_after: usize,
}

impl TransformChange {
    /// Rows removed by the operation (zero for operations that add rows).
    pub fn rows_dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

impl TransformResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.changes.push(change);
    }
}

/// Split the first column into its key fields.
///
/// The header gives the field names; every cell must have the same number
/// of parts. Key columns come first, followed by the remaining columns in
/// their original order.
fn split_composite(table: DataTable, delimiter: char) -> Result<DataTable> {
    let (composite, cells) = table
        .column_at(0)
        .ok_or_else(|| LifexError::Schema("table has no columns".to_string()))?;

    let names: Vec<String> = composite.split(delimiter).map(|s| s.to_string()).collect();
    let mut keys: Vec<Vec<Cell>> = vec![Vec::with_capacity(cells.len()); names.len()];

    for (row, cell) in cells.iter().enumerate() {
        let text = cell.as_text().ok_or_else(|| {
            LifexError::Schema(format!("row {}: composite key is not text", row + 1))
        })?;
        let parts: Vec<&str> = text.split(delimiter).collect();
        if parts.len() != names.len() {
            return Err(LifexError::Schema(format!(
                "row {}: '{}' has {} fields, header '{}' has {}",
                row + 1,
                text,
                parts.len(),
                composite,
                names.len()
            )));
        }
        for (key, part) in keys.iter_mut().zip(parts) {
            key.push(Cell::from(part));
        }
    }

    let composite = composite.to_string();
    let mut columns = table.into_columns();
    columns.shift_remove(&composite);

    let mut out = DataTable::new();
    for (name, values) in names.into_iter().zip(keys) {
        out.push_column(name, values)?;
    }
    for (name, values) in columns {
        out.push_column(name, values)?;
    }
    Ok(out)
}

/// Reshape wide to long: one output row per (input row, value column).
///
/// Rows are generated identifier-major: all value columns of the first input
/// row, then all of the second, and so on.
fn unpivot(
    table: DataTable,
    id_columns: &[String],
    var_name: &str,
    value_name: &str,
) -> Result<DataTable> {
    for id in id_columns {
        if !table.has_column(id) {
            return Err(LifexError::Schema(format!("identifier column '{}' not found", id)));
        }
    }

    let rows = table.row_count();
    let columns = table.into_columns();
    let (ids, values): (Vec<_>, Vec<_>) = columns
        .into_iter()
        .partition(|(name, _)| id_columns.contains(name));

    let out_rows = rows * values.len();
    let mut id_out: Vec<Vec<Cell>> = vec![Vec::with_capacity(out_rows); ids.len()];
    let mut var_out = Vec::with_capacity(out_rows);
    let mut value_out = Vec::with_capacity(out_rows);

    for row in 0..rows {
        for (name, cells) in &values {
            for (out, (_, id_cells)) in id_out.iter_mut().zip(&ids) {
                out.push(id_cells[row].clone());
            }
            var_out.push(Cell::from(name.as_str()));
            value_out.push(cells[row].clone());
        }
    }

    let mut out = DataTable::new();
    for ((name, _), cells) in ids.into_iter().zip(id_out) {
        out.push_column(name, cells)?;
    }
    out.push_column(var_name, var_out)?;
    out.push_column(value_name, value_out)?;
    Ok(out)
}

fn parse_year_column(table: DataTable, column: &str) -> Result<DataTable> {
    let cells = table
        .column(column)
        .ok_or_else(|| LifexError::Schema(format!("column '{}' not found", column)))?;

    let years = cells
        .iter()
        .map(|cell| match cell {
            Cell::Integer(y) => Ok(Cell::Integer(*y)),
            Cell::Text(s) => parse_year(s)
                .map(Cell::Integer)
                .ok_or_else(|| LifexError::Schema(format!("'{}' is not a year", s))),
            other => Err(LifexError::Schema(format!("'{}' is not a year", other))),
        })
        .collect::<Result<Vec<_>>>()?;

    replace_column(table, column, years)
}

/// Replace `column` with floats produced by `coerce`, dropping rows it rejects.
fn coerce_float_column(
    table: DataTable,
    column: &str,
    coerce: fn(&Cell) -> Option<f64>,
) -> Result<DataTable> {
    let cells = table
        .column(column)
        .ok_or_else(|| LifexError::Schema(format!("column '{}' not found", column)))?;

    let coerced: Vec<Option<f64>> = cells.iter().map(coerce).collect();
    let values = coerced
        .iter()
        .map(|v| v.map(Cell::Float).unwrap_or(Cell::Null))
        .collect();

    let mut table = replace_column(table, column, values)?;
    table.retain_rows(|i| coerced[i].is_some());
    Ok(table)
}

fn filter_equals(mut table: DataTable, column: &str, value: &str) -> Result<DataTable> {
    let keep: Vec<bool> = table
        .column(column)
        .ok_or_else(|| LifexError::Schema(format!("column '{}' not found", column)))?
        .iter()
        .map(|cell| cell.as_text() == Some(value))
        .collect();

    table.retain_rows(|i| keep[i]);
    Ok(table)
}

/// Swap a column's values in place, keeping its position.
fn replace_column(table: DataTable, column: &str, values: Vec<Cell>) -> Result<DataTable> {
    let mut out = DataTable::new();
    let mut replacement = Some(values);
    for (name, cells) in table.into_columns() {
        if name == column {
            out.push_column(name, replacement.take().unwrap_or_default())?;
        } else {
            out.push_column(name, cells)?;
        }
    }
    Ok(out)
}

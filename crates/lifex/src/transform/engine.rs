//! Engine that applies a planned sequence of operations to a table.

use tracing::debug;

use crate::error::Result;
use crate::input::DataTable;

use super::operations::{TransformChange, TransformOperation, TransformResult};

/// Applies operations in order, recording row counts around each one.
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply `operations` to `table`, stopping at the first failure.
    pub fn apply(
        &self,
        operations: &[TransformOperation],
        table: DataTable,
    ) -> Result<(DataTable, TransformResult)> {
        let mut result = TransformResult::new();
        let mut table = table;

        for op in operations {
            let rows_before = table.row_count();
            table = op.apply(table)?;

            let change = TransformChange {
                description: op.description(),
                rows_before,
                rows_after: table.row_count(),
            };
            debug!(
                operation = %change.description,
                rows_before = change.rows_before,
                rows_after = change.rows_after,
                "applied"
            );
            result.add_change(change);
        }

        Ok((table, result))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

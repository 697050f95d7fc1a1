//! Cleaners that bring each source shape to the canonical schema.

use tracing::{instrument, warn};

use crate::error::{LifexError, Result};
use crate::input::{Cell, DataTable};
use crate::region::Region;

use super::engine::TransformEngine;
use super::operations::{TransformOperation, TransformResult};

/// Canonical region column.
pub const REGION_COLUMN: &str = "region";
/// Canonical year column (wide sources only).
pub const YEAR_COLUMN: &str = "year";
/// Canonical observation column.
pub const VALUE_COLUMN: &str = "value";

/// Separator inside the wide table's composite key.
const KEY_DELIMITER: char = ',';

/// Annotation columns of the record source.
const FLAG_COLUMNS: [&str; 2] = ["flag", "flag_detail"];
const COUNTRY_COLUMN: &str = "country";
const LIFE_EXPECTANCY_COLUMN: &str = "life_expectancy";

/// Converts a raw table into the canonical schema for one region.
pub trait Cleaner {
    /// Plan the operations for `table`. Inspects headers only.
    fn plan(&self, table: &DataTable, region: Region) -> Result<Vec<TransformOperation>>;

    /// Clean `table`, keeping only rows for `region`.
    fn clean(&self, table: DataTable, region: Region) -> Result<(DataTable, TransformResult)> {
        let operations = self.plan(&table, region)?;
        TransformEngine::new().apply(&operations, table)
    }
}

/// Cleaner for the wide table keyed by a composite first column.
///
/// Output columns are the key fields (last one renamed to `region`), then
/// `year` and `value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WideTableCleaner;

impl Cleaner for WideTableCleaner {
    #[instrument(level = "debug", skip(self, table, region), fields(region = %region))]
    fn plan(&self, table: &DataTable, region: Region) -> Result<Vec<TransformOperation>> {
        let (composite, _) = table
            .column_at(0)
            .ok_or_else(|| LifexError::Schema("wide table has no columns".to_string()))?;

        let mut keys: Vec<String> = composite
            .split(KEY_DELIMITER)
            .map(|s| s.to_string())
            .collect();
        // split() always yields at least one part
        let last = keys.pop().unwrap_or_default();
        let mut id_columns = keys;
        id_columns.push(REGION_COLUMN.to_string());

        Ok(vec![
            TransformOperation::SplitComposite {
                delimiter: KEY_DELIMITER,
            },
            TransformOperation::Rename {
                from: last,
                to: REGION_COLUMN.to_string(),
            },
            TransformOperation::Unpivot {
                id_columns,
                var_name: YEAR_COLUMN.to_string(),
                value_name: VALUE_COLUMN.to_string(),
            },
            TransformOperation::ParseYear {
                column: YEAR_COLUMN.to_string(),
            },
            TransformOperation::ExtractNumeric {
                column: VALUE_COLUMN.to_string(),
            },
            TransformOperation::FilterEquals {
                column: REGION_COLUMN.to_string(),
                value: region.as_str().to_string(),
            },
        ])
    }
}

/// Cleaner for one-record-per-row tables decoded from JSON.
///
/// Drops the flag annotations and renames `country`/`life_expectancy`;
/// other columns pass through in their original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRecordCleaner;

impl Cleaner for FlatRecordCleaner {
    #[instrument(level = "debug", skip(self, table, region), fields(region = %region))]
    fn plan(&self, table: &DataTable, region: Region) -> Result<Vec<TransformOperation>> {
        for required in [COUNTRY_COLUMN, LIFE_EXPECTANCY_COLUMN] {
            if !table.has_column(required) {
                return Err(LifexError::Schema(format!(
                    "record table has no '{}' column",
                    required
                )));
            }
        }

        let non_numeric = table
            .column(LIFE_EXPECTANCY_COLUMN)
            .map(|cells| cells.iter().filter(|c| matches!(c, Cell::Text(_))).count())
            .unwrap_or(0);
        if non_numeric > 0 {
            warn!(non_numeric, "text values in '{}' will be dropped", LIFE_EXPECTANCY_COLUMN);
        }

        Ok(vec![
            TransformOperation::DropColumns {
                columns: FLAG_COLUMNS.iter().map(|c| c.to_string()).collect(),
            },
            TransformOperation::Rename {
                from: COUNTRY_COLUMN.to_string(),
                to: REGION_COLUMN.to_string(),
            },
            TransformOperation::Rename {
                from: LIFE_EXPECTANCY_COLUMN.to_string(),
                to: VALUE_COLUMN.to_string(),
            },
            TransformOperation::RequireNumeric {
                column: VALUE_COLUMN.to_string(),
            },
            TransformOperation::FilterEquals {
                column: REGION_COLUMN.to_string(),
                value: region.as_str().to_string(),
            },
        ])
    }
}

//! Persistence for cleaned tables - CSV output.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{LifexError, Result};
use crate::input::DataTable;

/// Write `table` as comma-separated text: a header row, then one line per row.
pub fn write_csv<W: Write>(table: &DataTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(table.headers())
        .map_err(|e| LifexError::Persistence(format!("Failed to write header: {}", e)))?;

    for i in 0..table.row_count() {
        let record: Vec<String> = table
            .row(i)
            .unwrap_or_default()
            .iter()
            .map(|cell| cell.to_string())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| LifexError::Persistence(format!("Failed to write row {}: {}", i + 1, e)))?;
    }

    writer
        .flush()
        .map_err(|e| LifexError::Persistence(format!("Failed to flush output: {}", e)))?;
    Ok(())
}

/// Save the table to a CSV file.
///
/// The data is written to a temporary file next to `path` and moved into
/// place once complete, so a failure never leaves a partial file behind.
///
/// # Example
///
/// ```no_run
/// # use lifex::{save_table, DataTable};
/// # fn example(table: &DataTable) -> lifex::Result<()> {
/// save_table(table, "data/pt_life_expectancy.csv")?;
/// # Ok(())
/// # }
/// ```
pub fn save_table(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| {
            LifexError::Persistence(format!(
                "Failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let staged = NamedTempFile::new_in(parent).map_err(|e| {
        LifexError::Persistence(format!(
            "Failed to create file in '{}': {}",
            parent.display(),
            e
        ))
    })?;

    write_csv(table, staged.as_file())?;

    staged.persist(path).map_err(|e| {
        LifexError::Persistence(format!("Failed to save '{}': {}", path.display(), e))
    })?;

    info!(path = %path.display(), rows = table.row_count(), "saved table");
    Ok(())
}

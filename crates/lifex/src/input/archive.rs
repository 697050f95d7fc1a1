//! Loader for zip archives carrying a row-oriented JSON table.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde_json::Value;
use tracing::{debug, info, instrument};
use zip::ZipArchive;

use crate::error::{LifexError, Result};
use super::source::SourceMetadata;
use super::table::{Cell, DataTable};
use super::Loader;

/// Extracts an archive into a staging directory and parses its JSON payload.
#[derive(Debug, Clone, Default)]
pub struct JsonArchiveLoader {
    /// Where to extract. `None` uses a temporary directory removed after loading.
    staging_dir: Option<PathBuf>,
}

impl JsonArchiveLoader {
    /// Create a loader that stages into a temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract into `dir` and keep the extracted files.
    pub fn with_staging_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: Some(dir.into()),
        }
    }

    /// Extract every entry of the archive into `dir`.
    ///
    /// Returns the extracted paths of JSON entries, in archive order.
    fn extract(&self, path: &Path, contents: &[u8], dir: &Path) -> Result<Vec<PathBuf>> {
        let mut archive = ZipArchive::new(Cursor::new(contents))
            .map_err(|e| LifexError::source_read(path, format!("not a zip archive: {}", e)))?;

        archive
            .extract(dir)
            .map_err(|e| LifexError::source_read(path, format!("extraction failed: {}", e)))?;

        let mut payloads = Vec::new();
        for i in 0..archive.len() {
            let entry = archive
                .by_index_raw(i)
                .map_err(|e| LifexError::source_read(path, e))?;
            if entry.is_dir() {
                continue;
            }
            let Some(name) = entry.enclosed_name() else {
                continue;
            };
            let is_json = name
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json {
                payloads.push(dir.join(name));
            }
        }

        debug!(entries = archive.len(), json_entries = payloads.len(), "extracted archive");
        Ok(payloads)
    }
}

impl Loader for JsonArchiveLoader {
    #[instrument(level = "info", skip(self, path), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<(DataTable, SourceMetadata)> {
        let contents = fs::read(path).map_err(|e| LifexError::source_read(path, e))?;

        // Held until the payload is parsed; dropping it removes the directory.
        let temp_dir;
        let staging: &Path = match &self.staging_dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| {
                    LifexError::source_read(
                        path,
                        format!("cannot create staging dir '{}': {}", dir.display(), e),
                    )
                })?;
                dir
            }
            None => {
                temp_dir = tempfile::Builder::new()
                    .prefix("lifex-staging-")
                    .tempdir()
                    .map_err(|e| LifexError::source_read(path, e))?;
                temp_dir.path()
            }
        };

        let payloads = self.extract(path, &contents, staging)?;
        let payload = payloads
            .first()
            .ok_or_else(|| LifexError::source_read(path, "archive contains no JSON payload"))?;

        let bytes = fs::read(payload).map_err(|e| LifexError::source_read(payload, e))?;
        let table = parse_records(path, &bytes)?;
        info!(
            payload = %payload.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded record table"
        );

        let source = SourceMetadata::new(
            path,
            &contents,
            "zip",
            table.row_count(),
            table.column_count(),
        );
        Ok((table, source))
    }
}

/// Parse a JSON array of objects into a table.
///
/// Columns appear in first-seen key order; absent keys become nulls.
pub fn parse_records(origin: &Path, bytes: &[u8]) -> Result<DataTable> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| LifexError::source_read(origin, format!("invalid JSON payload: {}", e)))?;

    let Value::Array(records) = document else {
        return Err(LifexError::source_read(
            origin,
            "JSON payload is not an array of records",
        ));
    };

    let mut objects = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        match record {
            Value::Object(map) => objects.push(map),
            _ => {
                return Err(LifexError::source_read(
                    origin,
                    format!("record {} is not a JSON object", idx + 1),
                ));
            }
        }
    }

    let headers: IndexSet<&str> = objects
        .iter()
        .flat_map(|map| map.keys().map(|k| k.as_str()))
        .collect();

    let rows: Vec<Vec<Cell>> = objects
        .iter()
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(*h).map(Cell::from_json).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();

    DataTable::from_rows(headers.iter().map(|h| h.to_string()).collect(), rows)
}

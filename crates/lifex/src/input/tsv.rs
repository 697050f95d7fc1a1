//! Loader for the wide, tab-separated source table.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::{LifexError, Result};
use super::source::SourceMetadata;
use super::table::{Cell, DataTable};
use super::Loader;

/// Delimited-text reader configuration.
#[derive(Debug, Clone)]
pub struct TsvConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for TsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            quote: b'"',
        }
    }
}

/// Reads a delimited table where every row has the header's width.
///
/// Cells are kept verbatim as text; annotation characters and padding are
/// left for the cleaner to interpret.
#[derive(Debug, Clone, Default)]
pub struct TsvLoader {
    config: TsvConfig,
}

impl TsvLoader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: TsvConfig) -> Self {
        Self { config }
    }

    /// Parse already-read bytes. `origin` is only used in error messages.
    pub fn parse_bytes(&self, origin: &Path, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| LifexError::source_read(origin, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LifexError::source_read(origin, "no header row"));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LifexError::source_read(origin, e))?;
            rows.push(record.iter().map(Cell::from).collect());
        }

        DataTable::from_rows(headers, rows)
            .map_err(|e| LifexError::source_read(origin, e))
    }
}

impl Loader for TsvLoader {
    #[instrument(level = "info", skip(self, path), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<(DataTable, SourceMetadata)> {
        let contents = fs::read(path).map_err(|e| LifexError::source_read(path, e))?;
        debug!(bytes = contents.len(), "read delimited source");

        let table = self.parse_bytes(path, &contents)?;
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded wide table"
        );

        let source = SourceMetadata::new(
            path,
            &contents,
            "tsv",
            table.row_count(),
            table.column_count(),
        );
        Ok((table, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const WIDE: &str = "unit,sex,age,geo\\time\t2021 \t2020 \n\
                        YR,F,Y1,AL\t79.4 \t: \n\
                        YR,F,Y1,PT\t83.2 e\t79.6 \n";

    #[test]
    fn test_parse_wide_table() {
        let loader = TsvLoader::new();
        let table = loader.parse_bytes(Path::new("mem.tsv"), WIDE.as_bytes()).unwrap();

        let headers: Vec<&str> = table.headers().collect();
        assert_eq!(headers, vec!["unit,sex,age,geo\\time", "2021 ", "2020 "]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, "2021 "), Some(&Cell::from("83.2 e")));
        assert_eq!(table.get(0, "2020 "), Some(&Cell::from(": ")));
    }

    #[test]
    fn test_inconsistent_column_count_is_source_error() {
        let loader = TsvLoader::new();
        let data = b"a\tb\n1\t2\t3\n";
        let result = loader.parse_bytes(Path::new("bad.tsv"), data);

        assert!(matches!(result, Err(LifexError::SourceRead { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_source_error() {
        let loader = TsvLoader::new();
        let result = loader.parse_bytes(Path::new("bad.tsv"), b"unit\t2021\n\xff\xfe\t1\n");
        assert!(matches!(result, Err(LifexError::SourceRead { .. })));
    }

    #[test]
    fn test_empty_input_is_source_error() {
        let loader = TsvLoader::new();
        let result = loader.parse_bytes(Path::new("empty.tsv"), b"");
        assert!(matches!(result, Err(LifexError::SourceRead { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(WIDE.as_bytes()).unwrap();

        let (table, source) = TsvLoader::new().load(file.path()).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(source.format, "tsv");
        assert_eq!(source.row_count, 2);
        assert_eq!(source.size_bytes, WIDE.len() as u64);
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let result = TsvLoader::new().load(Path::new("/nonexistent/raw.tsv"));
        assert!(matches!(result, Err(LifexError::SourceRead { .. })));
    }
}

//! Format dispatch and the load → clean → save pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{LifexError, Result};
use crate::input::{DataTable, JsonArchiveLoader, Loader, SourceMetadata, TsvConfig, TsvLoader};
use crate::output::save_table;
use crate::region::Region;
use crate::transform::{Cleaner, FlatRecordCleaner, TransformResult, WideTableCleaner};

/// Source formats the pipeline understands, keyed by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Tab-separated wide table with a composite key column (`.tsv`).
    TabularWide,
    /// Zip archive holding a JSON array of records (`.zip`).
    JsonArchive,
}

impl SourceFormat {
    /// Pick the format from the file suffix (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
            Some(ext) if ext == "tsv" => Ok(SourceFormat::TabularWide),
            Some(ext) if ext == "zip" => Ok(SourceFormat::JsonArchive),
            _ => Err(LifexError::UnsupportedFormat(format!(
                "'{}' (expected a .tsv or .zip file)",
                path.display()
            ))),
        }
    }

    /// The suffix this format is recognized by.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::TabularWide => "tsv",
            SourceFormat::JsonArchive => "zip",
        }
    }

    /// Load `path` with this format's loader.
    pub fn load(
        &self,
        path: &Path,
        config: &PipelineConfig,
    ) -> Result<(DataTable, SourceMetadata)> {
        match self {
            SourceFormat::TabularWide => TsvLoader::with_config(config.tsv.clone()).load(path),
            SourceFormat::JsonArchive => {
                let loader = match &config.staging_dir {
                    Some(dir) => JsonArchiveLoader::with_staging_dir(dir),
                    None => JsonArchiveLoader::new(),
                };
                loader.load(path)
            }
        }
    }

    /// Clean a raw table with this format's cleaner.
    pub fn clean(&self, table: DataTable, region: Region) -> Result<(DataTable, TransformResult)> {
        match self {
            SourceFormat::TabularWide => WideTableCleaner.clean(table, region),
            SourceFormat::JsonArchive => FlatRecordCleaner.clean(table, region),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for pipeline runs.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Reader settings for delimited sources.
    pub tsv: TsvConfig,
    /// Directory archives are extracted into (None = temporary directory).
    pub staging_dir: Option<PathBuf>,
}

impl PipelineConfig {
    /// Keep extracted archive contents in `dir`.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Use custom delimited-text settings.
    pub fn with_tsv(mut self, tsv: TsvConfig) -> Self {
        self.tsv = tsv;
        self
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Format the source was dispatched on.
    pub format: SourceFormat,
    /// Region the table was filtered to.
    pub region: Region,
    /// Cleaned table in the canonical schema.
    pub table: DataTable,
    /// Row accounting for each cleaning step.
    pub report: TransformResult,
}

/// Loads, cleans and optionally saves one source file.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Load and clean `path`, keeping only `region`.
    #[instrument(
        level = "info",
        skip(self, path, region),
        fields(path = %path.as_ref().display(), region = %region)
    )]
    pub fn run(&self, path: impl AsRef<Path>, region: Region) -> Result<PipelineOutput> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;

        let (raw, source) = format.load(path, &self.config)?;
        let (table, report) = format.clean(raw, region)?;

        info!(
            format = %format,
            raw_rows = source.row_count,
            rows = table.row_count(),
            "cleaned source"
        );

        Ok(PipelineOutput {
            source,
            format,
            region,
            table,
            report,
        })
    }

    /// Run the pipeline and save the cleaned table to `output`.
    ///
    /// Nothing is written if loading or cleaning fails.
    pub fn run_and_save(
        &self,
        path: impl AsRef<Path>,
        region: Region,
        output: impl AsRef<Path>,
    ) -> Result<PipelineOutput> {
        let result = self.run(path, region)?;
        save_table(&result.table, output)?;
        Ok(result)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_format_from_suffix() {
        assert_eq!(
            SourceFormat::from_path("eu_life_expectancy_raw.tsv").unwrap(),
            SourceFormat::TabularWide
        );
        assert_eq!(
            SourceFormat::from_path("data/eurostat_life_expec.zip").unwrap(),
            SourceFormat::JsonArchive
        );
        assert_eq!(
            SourceFormat::from_path("RAW.TSV").unwrap(),
            SourceFormat::TabularWide
        );
    }

    #[test]
    fn test_unknown_suffix_is_unsupported() {
        for name in ["data.csv", "data.json", "data", "archive.tar.gz", "tsv"] {
            let result = SourceFormat::from_path(name);
            assert!(
                matches!(result, Err(LifexError::UnsupportedFormat(_))),
                "{} should be unsupported",
                name
            );
        }
    }

    #[test]
    fn test_run_wide_source() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(b"unit,sex,age,geo\\time\t2021 \t2020 \nYR,T,Y1,PT\t81.5 \t: \n")
            .unwrap();

        let output = Pipeline::new().run(file.path(), Region::Pt).unwrap();

        assert_eq!(output.format, SourceFormat::TabularWide);
        assert_eq!(output.table.row_count(), 1);
        assert_eq!(output.source.row_count, 1);
        assert_eq!(output.report.operations_applied, 6);
    }

    #[test]
    fn test_custom_delimiter_via_config() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(b"unit,sex,age,geo\\time;2021;2022\nYR,T,Y1,PT;81.5 e;: \n")
            .unwrap();

        let config = PipelineConfig::default().with_tsv(TsvConfig {
            delimiter: b';',
            ..TsvConfig::default()
        });
        let output = Pipeline::with_config(config).run(file.path(), Region::Pt).unwrap();

        assert_eq!(output.source.column_count, 3);
        assert_eq!(output.table.row_count(), 1);
        assert_eq!(output.table.get(0, "year"), Some(&Cell::Integer(2021)));
        assert_eq!(output.table.get(0, "value"), Some(&Cell::Float(81.5)));
    }

    #[test]
    fn test_unsupported_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = NamedTempFile::new_in(dir.path()).unwrap();
        let out = dir.path().join("out.csv");

        let result = Pipeline::new().run_and_save(input.path(), Region::Pt, &out);

        assert!(matches!(result, Err(LifexError::UnsupportedFormat(_))));
        assert!(!out.exists());
    }
}

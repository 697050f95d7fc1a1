//! Input loading: raw tables, source metadata and the two source loaders.

mod archive;
mod source;
mod table;
mod tsv;

use std::path::Path;

use crate::error::Result;

pub use archive::{parse_records, JsonArchiveLoader};
pub use source::{content_hash, SourceMetadata};
pub use table::{Cell, DataTable};
pub use tsv::{TsvConfig, TsvLoader};

/// Reads a source file into a raw table.
pub trait Loader {
    /// Load `path`, returning the raw table and its provenance.
    fn load(&self, path: &Path) -> Result<(DataTable, SourceMetadata)>;
}

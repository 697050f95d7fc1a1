//! lifex: normalizes life-expectancy datasets into one long-format table.
//!
//! The dataset is published in two shapes: a wide tab-separated table whose
//! first column packs several keys into one comma-joined field, and a zip
//! archive holding a JSON array of records. Both are loaded, reshaped into a
//! canonical schema, filtered to one region and written as CSV.
//!
//! # Pipeline
//!
//! - **Load**: a [`Loader`] per format reads the source into a [`DataTable`]
//! - **Clean**: a [`Cleaner`] per format plans and applies table operations
//! - **Save**: [`save_table`] writes the result atomically
//!
//! [`SourceFormat`] picks the loader/cleaner pair from the file suffix.
//!
//! # Example
//!
//! ```no_run
//! use lifex::{Pipeline, Region};
//!
//! let pipeline = Pipeline::new();
//! let output = pipeline
//!     .run_and_save("data/eurostat_life_expec.zip", Region::Pt, "data/pt_life_expectancy.csv")
//!     .unwrap();
//!
//! println!("Rows: {}", output.table.row_count());
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod region;
pub mod transform;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput, SourceFormat};
pub use error::{ErrorKind, LifexError, Result};
pub use input::{Cell, DataTable, JsonArchiveLoader, Loader, SourceMetadata, TsvConfig, TsvLoader};
pub use output::{save_table, write_csv};
pub use region::Region;
pub use transform::{
    Cleaner, FlatRecordCleaner, TransformChange, TransformOperation, TransformResult,
    WideTableCleaner,
};

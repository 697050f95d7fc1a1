//! Reshaping raw tables into the canonical long format.

mod cleaner;
mod coerce;
mod engine;
mod operations;

pub use cleaner::{
    Cleaner, FlatRecordCleaner, WideTableCleaner, REGION_COLUMN, VALUE_COLUMN, YEAR_COLUMN,
};
pub use coerce::{extract_value, parse_year};
pub use engine::TransformEngine;
pub use operations::{TransformChange, TransformOperation, TransformResult};

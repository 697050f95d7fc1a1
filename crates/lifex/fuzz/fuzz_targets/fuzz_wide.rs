//! Fuzz target for the wide-table loader and cleaner.
//!
//! Arbitrary bytes must either load and clean, or fail with an error.
//! Neither step may panic.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use lifex::{Cleaner, Region, TsvLoader, WideTableCleaner};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let loader = TsvLoader::new();
    if let Ok(table) = loader.parse_bytes(Path::new("fuzz.tsv"), data) {
        if let Ok((clean, _)) = WideTableCleaner.clean(table, Region::Pt) {
            for cell in clean.column("value").unwrap_or_default() {
                assert!(cell.as_f64().is_some());
            }
        }
    }
});

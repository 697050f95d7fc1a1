//! Fuzz target for the JSON record parser and record cleaner.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use lifex::input::parse_records;
use lifex::{Cleaner, FlatRecordCleaner, Region};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = parse_records(Path::new("fuzz.json"), data) {
        if let Ok((clean, _)) = FlatRecordCleaner.clean(table, Region::Pt) {
            assert!(!clean.has_column("flag"));
        }
    }
});

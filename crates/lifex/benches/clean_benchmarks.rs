//! Loading and cleaning benchmarks.
//!
//! Measures TSV loading and wide-table cleaning across table sizes shaped
//! like the published dataset (four key fields, one column per year).

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lifex::{Cleaner, Loader, Region, TsvLoader, WideTableCleaner};
use tempfile::NamedTempFile;

const REGIONS: &[&str] = &["AT", "BE", "PT", "AL", "FR", "DE", "EU28", "EFTA"];

/// Generate a synthetic wide TSV with `rows` key rows and `years` year columns.
fn generate_wide_tsv(rows: usize, years: usize) -> String {
    let mut data = String::from("unit,sex,age,geo\\time");
    for y in 0..years {
        data.push_str(&format!("\t{} ", 2023 - y));
    }
    data.push('\n');

    for row in 0..rows {
        let sex = ["F", "M", "T"][row % 3];
        let region = REGIONS[row % REGIONS.len()];
        data.push_str(&format!("YR,{},Y{},{}", sex, row / 24, region));
        for y in 0..years {
            // Mix of clean, annotated and missing cells
            match (row + y) % 7 {
                0 => data.push_str("\t: "),
                1 => data.push_str(&format!("\t{:.1} e", 70.0 + (y % 15) as f64)),
                2 => data.push_str(&format!("\t{:.1} b", 75.0 + (row % 9) as f64)),
                _ => data.push_str(&format!("\t{:.1} ", 80.0 + (y % 5) as f64 / 10.0)),
            }
        }
        data.push('\n');
    }

    data
}

fn bench_load_tsv(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_tsv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_wide_tsv(*rows, 60);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &file, |b, file| {
            let loader = TsvLoader::new();
            b.iter(|| black_box(loader.load(file.path()).unwrap()));
        });
    }

    group.finish();
}

fn bench_clean_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_wide");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_wide_tsv(*rows, 60);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();
        let (table, _) = TsvLoader::new().load(file.path()).unwrap();

        group.throughput(Throughput::Elements((*rows * 60) as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter_with_setup(
                || table.clone(),
                |table| black_box(WideTableCleaner.clean(table, Region::Pt).unwrap()),
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_tsv, bench_clean_wide);
criterion_main!(benches);

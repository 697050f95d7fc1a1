//! Clean command - load, clean and save one region's table.

use colored::Colorize;
use lifex::{Pipeline, PipelineConfig, Region};
use std::path::{Path, PathBuf};

pub fn run(
    region: String,
    input: PathBuf,
    data_dir: PathBuf,
    output: Option<PathBuf>,
    staging_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = parse_region(&region)?;
    let input_path = resolve_input(&data_dir, &input);
    let output_path = output.unwrap_or_else(|| default_output(&data_dir, region));

    println!(
        "{} {} for region {}",
        "Cleaning".cyan().bold(),
        input_path.display(),
        region.to_string().bold()
    );

    let mut config = PipelineConfig::default();
    if let Some(dir) = staging_dir {
        config = config.with_staging_dir(dir);
    }

    let result = Pipeline::with_config(config).run_and_save(&input_path, region, &output_path)?;

    if verbose {
        println!();
        println!(
            "Source: {} ({} format, {} rows x {} columns, {})",
            result.source.file,
            result.format,
            result.source.row_count,
            result.source.column_count,
            result.source.hash
        );
        for change in &result.report.changes {
            let dropped = change.rows_dropped();
            let detail = if dropped > 0 {
                format!("-{} rows", dropped).yellow().to_string()
            } else {
                format!("{} rows", change.rows_after).dimmed().to_string()
            };
            println!("  {} {}", change.description, detail);
        }
        println!();
    }

    if result.table.is_empty() {
        println!(
            "{} no rows for region {}",
            "Warning:".yellow().bold(),
            region
        );
    }

    println!(
        "{} {} rows to {}",
        "Wrote".green().bold(),
        result.table.row_count(),
        output_path.display()
    );

    Ok(())
}

/// Region codes are matched after trimming and uppercasing.
fn parse_region(code: &str) -> lifex::Result<Region> {
    code.trim().to_ascii_uppercase().parse()
}

/// Bare file names are looked up in the data directory; anything with a
/// directory component is used as given.
fn resolve_input(data_dir: &Path, input: &Path) -> PathBuf {
    if input.is_absolute() || input.components().count() > 1 {
        input.to_path_buf()
    } else {
        data_dir.join(input)
    }
}

fn default_output(data_dir: &Path, region: Region) -> PathBuf {
    data_dir.join(format!(
        "{}_life_expectancy.csv",
        region.as_str().to_ascii_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifex::ErrorKind;

    #[test]
    fn test_parse_region_normalizes_case() {
        assert_eq!(parse_region("pt").unwrap(), Region::Pt);
        assert_eq!(parse_region(" eu28 ").unwrap(), Region::Eu28);
        assert_eq!(parse_region("de_tot").unwrap(), Region::DeTot);
    }

    #[test]
    fn test_parse_region_rejects_unknown() {
        let err = parse_region("XX").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRegion);
    }

    #[test]
    fn test_resolve_input() {
        let data = Path::new("data");
        assert_eq!(
            resolve_input(data, Path::new("eurostat_life_expec.zip")),
            PathBuf::from("data/eurostat_life_expec.zip")
        );
        assert_eq!(
            resolve_input(data, Path::new("other/raw.tsv")),
            PathBuf::from("other/raw.tsv")
        );
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data"), Region::Pt),
            PathBuf::from("data/pt_life_expectancy.csv")
        );
        assert_eq!(
            default_output(Path::new("out"), Region::Eea30_2007),
            PathBuf::from("out/eea30_2007_life_expectancy.csv")
        );
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("raw.tsv"),
            "unit,sex,age,geo\\time\t2021 \nYR,T,Y1,PT\t81.5 e\n",
        )
        .unwrap();

        run(
            "pt".to_string(),
            PathBuf::from("raw.tsv"),
            dir.path().to_path_buf(),
            None,
            None,
            true,
        )
        .unwrap();

        let saved = std::fs::read_to_string(dir.path().join("pt_life_expectancy.csv")).unwrap();
        assert_eq!(saved, "unit,sex,age,region,year,value\nYR,T,Y1,PT,2021,81.5\n");
    }

    #[test]
    fn test_run_unsupported_input_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("raw.csv"),
            "unit,sex,age,geo\\time\t2021 \nYR,T,Y1,PT\t81.5 e\n",
        )
        .unwrap();

        let err = run(
            "PT".to_string(),
            PathBuf::from("raw.csv"),
            dir.path().to_path_buf(),
            None,
            None,
            false,
        )
        .unwrap_err();

        let err = err.downcast_ref::<lifex::LifexError>().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(!dir.path().join("pt_life_expectancy.csv").exists());
    }
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Input file looked up in the data directory when none is given.
pub const DEFAULT_INPUT: &str = "eurostat_life_expec.zip";

/// Directory holding inputs and outputs by default.
pub const DEFAULT_DATA_DIR: &str = "data";

/// lifex: life-expectancy cleaning pipeline
#[derive(Parser)]
#[command(name = "lifex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, clean and save the dataset for one region
    Clean {
        /// Region code (e.g. PT, DE_TOT, EU28)
        #[arg(value_name = "REGION")]
        region: String,

        /// Source file (.tsv or .zip); bare names are looked up in the data directory
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Data directory
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Output CSV path (default: <data-dir>/<region>_life_expectancy.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep extracted archive contents in this directory
        #[arg(long)]
        staging_dir: Option<PathBuf>,
    },

    /// List known region codes
    Regions {
        /// Include aggregate groupings (EU28, EFTA, ...)
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

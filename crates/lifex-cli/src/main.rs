//! lifex CLI - clean life-expectancy data for one region.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use lifex::LifexError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            region,
            input,
            data_dir,
            output,
            staging_dir,
        } => commands::clean::run(region, input, data_dir, output, staging_dir, cli.verbose),

        Commands::Regions { all, json } => commands::regions::run(all, json),
    };

    if let Err(e) = result {
        eprintln!("{}", error_line(e.as_ref()));
        std::process::exit(1);
    }
}

/// Library errors are tagged with their kind; anything else is reported as is.
fn error_line(e: &(dyn std::error::Error + 'static)) -> String {
    match e.downcast_ref::<LifexError>() {
        Some(err) => format!("Error ({}): {}", err.kind(), err),
        None => format!("Error: {}", e),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,lifex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! hanlp CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use analysis_hanlp::cli::args::*;
use analysis_hanlp::cli::commands::*;

fn main() {
    let args = HanLpArgs::parse();

    let default_level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

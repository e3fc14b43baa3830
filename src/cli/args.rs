//! Command line argument parsing for the hanlp CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// hanlp - Chinese word segmentation tokenizers and analyzers
#[derive(Parser, Debug, Clone)]
#[command(name = "hanlp")]
#[command(about = "Inspect and run the HanLP tokenizers and analyzers of a plugin home")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HanLpArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Installation directory (`path.home`)
    #[arg(long, env = "HANLP_HOME", default_value = ".", value_name = "PATH")]
    pub home: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HanLpArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the registered tokenizers and analyzers
    List(ListArgs),

    /// Analyze text with a registered tokenizer or analyzer
    Analyze(AnalyzeArgs),
}

/// Arguments for listing variants
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Also show variants whose model is missing
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Registered variant name, e.g. hanlp_index
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Field name passed to the analyzer
    #[arg(long, default_value = "content")]
    pub field: String,

    /// Per-index setting overriding the plugin configuration (KEY=VALUE)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Use the tokenizer instead of the analyzer
    #[arg(long)]
    pub tokenizer: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

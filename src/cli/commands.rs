//! Command implementations for the hanlp CLI.

use std::time::Instant;

use tracing::debug;

use crate::analysis::token::Token;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::plugin::{HanLpPlugin, IndexMode, default_catalog};
use crate::settings::{PATH_HOME_SETTING, Settings};

/// Execute a CLI command.
pub fn execute_command(args: HanLpArgs) -> Result<()> {
    let plugin = load_plugin(&args)?;

    match &args.command {
        Command::List(list_args) => list_variants(&plugin, list_args, &args),
        Command::Analyze(analyze_args) => analyze_text(&plugin, analyze_args, &args),
    }
}

/// Build the plugin the way the host would, from `path.home`.
pub fn load_plugin(args: &HanLpArgs) -> Result<HanLpPlugin> {
    let settings = Settings::builder()
        .put(PATH_HOME_SETTING, args.home.display())
        .build();
    HanLpPlugin::new(&settings)
}

/// List catalog variants and whether they are registered.
fn list_variants(plugin: &HanLpPlugin, args: &ListArgs, cli_args: &HanLpArgs) -> Result<()> {
    let registrations = plugin.registrations();
    let variants: Vec<VariantInfo> = default_catalog()
        .iter()
        .map(|descriptor| VariantInfo {
            name: descriptor.name().to_string(),
            algorithm: descriptor.algorithm.name().to_string(),
            index_mode: descriptor.index_mode == IndexMode::Forced,
            required_resource: descriptor
                .required_resource()
                .map(|p| plugin.environment().resolve(p).display().to_string()),
            available: registrations.contains(descriptor.name()),
        })
        .filter(|variant| args.all || variant.available)
        .collect();

    output_result(
        &format!(
            "{} of {} variants registered under {}",
            registrations.len(),
            default_catalog().len(),
            plugin.environment().home().display()
        ),
        &VariantList { variants },
        cli_args,
    )
}

/// Run a tokenizer or analyzer over the given text.
fn analyze_text(plugin: &HanLpPlugin, args: &AnalyzeArgs, cli_args: &HanLpArgs) -> Result<()> {
    let mut builder = Settings::builder();
    for pair in &args.settings {
        builder = builder.put_pair(pair)?;
    }
    let index_settings = builder.build();

    let start_time = Instant::now();
    let tokens: Vec<Token> = if args.tokenizer {
        let factory = plugin.tokenizer(&args.name, &index_settings)?;
        factory.create()?.tokenize(&args.text)?.collect()
    } else {
        let analyzer = plugin.analyzer(&args.name, &index_settings)?;
        analyzer.analyze(&args.field, &args.text)?.collect()
    };
    let duration = start_time.elapsed();
    debug!(name = %args.name, tokens = tokens.len(), ?duration, "analyzed text");

    output_result(
        &format!("Analyzed with [{}]", args.name),
        &AnalysisResult {
            name: args.name.clone(),
            field: args.field.clone(),
            tokens: tokens.iter().map(TokenInfo::from).collect(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zonekeeper::EngineConfig;

use crate::config::Config;

/// Install the tracing subscriber.
///
/// - `quiet`: no log output at all
/// - `verbose`: debug level for everything
/// - otherwise `RUST_LOG`, falling back to warnings only
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;
    debug!(path = %Config::path()?.display(), "loaded configuration");

    // Flags and environment (handled by clap) win over the config file
    let ctx = commands::Context {
        api_token: cli.api_token.or_else(|| config.api_token.clone()),
        base_url: cli.base_url.or_else(|| config.base_url.clone()),
        output_format: cli.output.or(config.output_format).unwrap_or_default(),
        engine: config
            .max_response_chars
            .map_or_else(EngineConfig::default, |chars| {
                EngineConfig::default().max_response_chars(chars)
            }),
        default_zone: config.default_zone.clone(),
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Zones(args) => commands::zones::execute(ctx, args).await,
        Commands::Records(args) => commands::records::execute(ctx, args).await,
        Commands::Bulk(args) => commands::bulk::execute(ctx, args).await,
        Commands::Export(args) => commands::export::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}

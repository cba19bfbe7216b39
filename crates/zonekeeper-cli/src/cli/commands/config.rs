//! `zk config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = Config::load()?;
    config.api_token = config.masked_token();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let unset = || "(not set)".dimmed().to_string();
            println!(
                "  {} {}",
                "api_token:".bold(),
                config.api_token.unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "base_url:".bold(),
                config.base_url.unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!(
                "  {} {}",
                "max_response_chars:".bold(),
                config
                    .max_response_chars
                    .map_or_else(unset, |c| c.to_string())
            );
            println!(
                "  {} {}",
                "default_zone:".bold(),
                config.default_zone.unwrap_or_else(unset)
            );
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if key.contains("token") { "****" } else { value };
    println!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}

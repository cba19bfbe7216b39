//! `zk zones` - List and inspect zones.

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table};
use zonekeeper::{Directory, Zone, ZoneFilter, ZoneStatus};

use super::{fail, Context};
use crate::cli::args::{ZonesArgs, ZonesCommands};
use crate::output::{to_csv, OutputFormat, ZoneRow};

pub async fn execute(ctx: Context, args: ZonesArgs) -> Result<()> {
    match args.command {
        ZonesCommands::List {
            name,
            status,
            page,
            per_page,
        } => list_zones(ctx, ZoneFilter { name, status }, page, per_page).await,
        ZonesCommands::Get { zone_id } => get_zone(ctx, &zone_id).await,
    }
}

async fn list_zones(ctx: Context, filter: ZoneFilter, page: u32, per_page: u32) -> Result<()> {
    let tools = ctx.toolbox()?;

    if ctx.output_format == OutputFormat::Json {
        let out = tools.list_zones(&filter, page, per_page).await;
        anyhow::ensure!(!out.is_error, out.text);
        println!("{}", out.text);
        return Ok(());
    }

    let list = tools.fetch_zones(&filter, page, per_page).await.map_err(fail)?;
    let rows: Vec<ZoneRow> = list.zones.iter().map(ZoneRow::from).collect();

    match ctx.output_format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&list)?),
        OutputFormat::Csv => print!("{}", to_csv(&rows)?),
        _ => {
            if rows.is_empty() {
                println!("  No zones found.");
                return Ok(());
            }
            println!("{}", Table::new(&rows).with(Style::rounded()));
            if let Some(total) = list.total_count {
                println!("{}", format!("Page {page}, {total} zones in total").dimmed());
            }
            if list.has_more {
                println!(
                    "{}",
                    format!("Tip: Use --page {} to see more zones", page + 1).dimmed()
                );
            }
        }
    }

    Ok(())
}

async fn get_zone(ctx: Context, zone_id: &str) -> Result<()> {
    if ctx.output_format == OutputFormat::Json {
        let out = ctx.toolbox()?.get_zone(zone_id).await;
        anyhow::ensure!(!out.is_error, out.text);
        println!("{}", out.text);
        return Ok(());
    }

    let zone = ctx.client()?.get_zone(zone_id).await.map_err(fail)?;

    match ctx.output_format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&zone)?),
        OutputFormat::Csv => print!("{}", to_csv(&[ZoneRow::from(&zone)])?),
        _ => print_zone_pretty(&zone),
    }

    Ok(())
}

fn print_zone_pretty(zone: &Zone) {
    let status = zone.status.to_string();
    let status = if zone.status == ZoneStatus::Active {
        status.green()
    } else {
        status.yellow()
    };

    println!("{} {}", "Zone:".bold(), zone.name.cyan());
    println!("  {} {}", "id:".bold(), zone.id);
    println!("  {} {}", "status:".bold(), status);
    if zone.paused {
        println!("  {} {}", "paused:".bold(), "yes".red());
    }
    if !zone.name_servers.is_empty() {
        println!("  {} {}", "name servers:".bold(), zone.name_servers.join(", "));
    }
    if let Some(created) = zone.created_on {
        println!("  {} {}", "created:".bold(), created.format("%Y-%m-%d %H:%M UTC"));
    }
}

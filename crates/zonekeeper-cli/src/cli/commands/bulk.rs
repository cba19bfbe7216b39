//! `zk bulk` - Create or update many records from a JSON file.

use anyhow::{Context as _, Result};
use colored::Colorize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use zonekeeper::{BulkOutcome, BulkReport, BulkUpdateItem, NewRecord, MAX_BATCH};

use super::{fail, Context};
use crate::cli::args::{BulkArgs, BulkCommands};
use crate::output::{clip, OutputFormat};

pub async fn execute(ctx: Context, args: BulkArgs) -> Result<()> {
    match args.command {
        BulkCommands::Create { file, zone } => {
            let records: Vec<NewRecord> = read_batch(&file)?;
            let zone = ctx.zone(zone)?;
            let report = ctx
                .toolbox()?
                .bulk_engine()
                .create(&zone, &records)
                .await
                .map_err(fail)?;
            show_report(&ctx, &report)
        }
        BulkCommands::Update { file, zone } => {
            let items: Vec<BulkUpdateItem> = read_batch(&file)?;
            let zone = ctx.zone(zone)?;
            let report = ctx
                .toolbox()?
                .bulk_engine()
                .update(&zone, &items)
                .await
                .map_err(fail)?;
            show_report(&ctx, &report)
        }
    }
}

/// Read a JSON array of batch items, checking its size before any request.
fn read_batch<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let items: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("{} must contain a JSON array of records", path.display()))?;

    anyhow::ensure!(!items.is_empty(), "{} contains no records", path.display());
    anyhow::ensure!(
        items.len() <= MAX_BATCH,
        "{} contains {} records; the limit per batch is {MAX_BATCH}",
        path.display(),
        items.len()
    );
    Ok(items)
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&BulkOutcome> for OutcomeRow {
    fn from(o: &BulkOutcome) -> Self {
        let record = o
            .record
            .as_ref()
            .map(|r| format!("{} {} ({})", r.record_type, r.name, r.id))
            .unwrap_or_default();
        Self {
            index: o.index,
            result: if o.success {
                "ok".green().to_string()
            } else {
                "failed".red().to_string()
            },
            record: clip(&record, 50),
            detail: clip(o.error.as_deref().unwrap_or(""), 60),
        }
    }
}

fn show_report(ctx: &Context, report: &BulkReport) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            println!("{}", ctx.guard().enforce(&json));
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["index", "success", "id", "name", "error"])?;
            for o in &report.results {
                let (id, name) = o
                    .record
                    .as_ref()
                    .map(|r| (r.id.as_str(), r.name.as_str()))
                    .unwrap_or_default();
                writer.write_record([
                    o.index.to_string().as_str(),
                    if o.success { "true" } else { "false" },
                    id,
                    name,
                    o.error.as_deref().unwrap_or(""),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            let rows: Vec<OutcomeRow> = report.results.iter().map(OutcomeRow::from).collect();
            println!("{}", Table::new(&rows).with(Style::rounded()));
            println!(
                "{} {} {}, {} failed, {} total",
                "Bulk:".bold(),
                report.succeeded.to_string().green(),
                report.operation.success_key(),
                report.failed.to_string().red(),
                report.total
            );
        }
    }

    anyhow::ensure!(
        report.failed == 0,
        "{} of {} items failed; the other items were applied",
        report.failed,
        report.total
    );
    Ok(())
}

//! `zk records` - Query, inspect and edit records.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use zonekeeper::{
    FormattedRecord, NewRecord, PageResponse, QueryFilter, RecordPatch, RecordQuery,
    ResponseEnvelope, SampleResponse, ZoneSummary,
};

use super::{fail, Context};
use crate::cli::args::{FilterArgs, RecordsArgs, RecordsCommands};
use crate::output::{clip, to_csv, OutputFormat, RecordRow};

pub async fn execute(ctx: Context, args: RecordsArgs) -> Result<()> {
    match args.command {
        RecordsCommands::Query {
            zone,
            filter,
            summary,
            sample,
            sample_size,
            page,
            per_page,
            sort_by,
            full,
        } => {
            let query = RecordQuery {
                zone_id: ctx.zone(zone)?,
                filter: filter.into(),
                summary,
                sample,
                sample_size: Some(sample_size),
                page: Some(page),
                per_page: Some(per_page),
                sort_by,
                concise: !full,
            };
            query_records(ctx, &query).await
        }
        RecordsCommands::Get {
            record_id,
            zone,
            full,
        } => {
            let zone = ctx.zone(zone)?;
            get_record(ctx, &zone, &record_id, !full).await
        }
        RecordsCommands::Create {
            zone,
            record_type,
            name,
            content,
            ttl,
            proxied,
            comment,
            priority,
            tags,
        } => {
            let zone = ctx.zone(zone)?;
            let record = NewRecord {
                record_type,
                name,
                content,
                ttl,
                proxied,
                comment,
                tags,
                priority,
                data: None,
            };
            create_record(ctx, &zone, &record).await
        }
        RecordsCommands::Update {
            record_id,
            zone,
            record_type,
            name,
            content,
            ttl,
            proxied,
            comment,
            priority,
        } => {
            let zone = ctx.zone(zone)?;
            let patch = RecordPatch {
                record_type,
                name,
                content,
                ttl,
                proxied,
                comment,
                priority,
                ..RecordPatch::default()
            };
            update_record(ctx, &zone, &record_id, &patch).await
        }
        RecordsCommands::Delete {
            record_id,
            zone,
            confirm,
        } => delete_record(ctx, zone, &record_id, confirm).await,
    }
}

impl From<FilterArgs> for QueryFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            record_type: args.record_type,
            name: args.name,
            content: args.content,
            comment: args.comment,
            proxied: args.proxied,
            tag: args.tag,
        }
    }
}

#[derive(Serialize, Tabled)]
struct TypeCountRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    record_type: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn type_rows(summary: &ZoneSummary) -> Vec<TypeCountRow> {
    summary
        .by_type
        .iter()
        .map(|(t, count)| TypeCountRow {
            record_type: t.clone(),
            count: *count,
        })
        .collect()
}

async fn query_records(ctx: Context, query: &RecordQuery) -> Result<()> {
    let tools = ctx.toolbox()?;

    if ctx.output_format == OutputFormat::Json {
        let out = tools.query_records(query).await;
        anyhow::ensure!(!out.is_error, out.text);
        println!("{}", out.text);
        return Ok(());
    }

    let response = tools.run_query(query).await.map_err(fail)?;

    match ctx.output_format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&response)?;
            print!("{}", ctx.guard().enforce(&yaml));
        }
        OutputFormat::Csv => {
            let csv = match &response {
                ResponseEnvelope::Summary(summary) => to_csv(&type_rows(summary))?,
                ResponseEnvelope::Sample(s) => to_csv(&rows(&s.records))?,
                ResponseEnvelope::Page(p) => to_csv(&rows(&p.records))?,
            };
            print!("{}", ctx.guard().enforce(&csv));
        }
        _ => match &response {
            ResponseEnvelope::Summary(summary) => print_summary(summary),
            ResponseEnvelope::Sample(sample) => print_sample(sample),
            ResponseEnvelope::Page(page) => print_page(page),
        },
    }

    Ok(())
}

fn rows(records: &[FormattedRecord]) -> Vec<RecordRow> {
    records.iter().map(RecordRow::from).collect()
}

fn print_table(records: &[FormattedRecord]) {
    let rows: Vec<RecordRow> = rows(records)
        .into_iter()
        .map(|mut r| {
            r.name = clip(&r.name, 40);
            r.content = clip(&r.content, 48);
            r.comment = clip(&r.comment, 30);
            r
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
}

fn print_summary(summary: &ZoneSummary) {
    println!("{} {}", "Total records:".bold(), summary.total.to_string().cyan());
    if summary.total == 0 {
        return;
    }
    println!("{}", Table::new(type_rows(summary)).with(Style::rounded()));
    println!(
        "{} {} proxied, {} DNS only",
        "Proxy:".bold(),
        summary.by_proxied.proxied.to_string().cyan(),
        summary.by_proxied.dns_only.to_string().cyan()
    );
}

fn print_sample(sample: &SampleResponse) {
    println!(
        "{} {} of {} matching records",
        "Sample:".bold(),
        sample.sample_size.to_string().cyan(),
        sample.total_in_zone
    );
    if !sample.records.is_empty() {
        print_table(&sample.records);
    }
}

fn print_page(page: &PageResponse) {
    let meta = &page.pagination;

    if page.records.is_empty() {
        println!("  No records on page {} ({} matching).", meta.page, meta.total);
    } else {
        print_table(&page.records);
    }

    println!(
        "{}",
        format!(
            "Page {} · {} of {} records",
            meta.page, meta.count, meta.total
        )
        .dimmed()
    );

    if let Some(summary) = &page.summary {
        let mix: Vec<String> = summary
            .by_type
            .iter()
            .map(|(t, n)| format!("{t} {n}"))
            .collect();
        println!("{} {}", "Types:".bold(), mix.join(", "));
    }
    if page.total_is_lower_bound {
        println!(
            "{}",
            format!(
                "Warning: fetch stopped at the safety cap; at least {} records match",
                meta.total
            )
            .yellow()
        );
    } else if page.fetch_capped {
        println!(
            "{}",
            "Warning: fetch stopped at the safety cap; the summary covers the fetched records only"
                .yellow()
        );
    }
    if meta.has_more {
        println!(
            "{}",
            format!("Tip: Use --page {} for more, or --summary for an overview", meta.page + 1)
                .dimmed()
        );
    }
}

/// Print a single record result in the chosen format.
fn show_record(ctx: &Context, heading: &str, record: &FormattedRecord) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(record)?),
        OutputFormat::Csv => print!("{}", to_csv(&[RecordRow::from(record)])?),
        OutputFormat::Pretty => {
            println!("{} {}", heading.green().bold(), record.id().cyan());
            match record {
                FormattedRecord::Concise(_) => print_table(std::slice::from_ref(record)),
                FormattedRecord::Full(full) => println!("{}", serde_json::to_string_pretty(full)?),
            }
        }
    }
    Ok(())
}

async fn get_record(ctx: Context, zone: &str, record_id: &str, concise: bool) -> Result<()> {
    let record = ctx
        .toolbox()?
        .fetch_record(zone, record_id, concise)
        .await
        .map_err(fail)?;
    show_record(&ctx, "Record", &record)
}

async fn create_record(ctx: Context, zone: &str, record: &NewRecord) -> Result<()> {
    record.validate().map_err(fail)?;
    let created = ctx
        .toolbox()?
        .apply_create(zone, record)
        .await
        .map_err(fail)?;
    show_record(&ctx, "Created", &created)
}

async fn update_record(
    ctx: Context,
    zone: &str,
    record_id: &str,
    patch: &RecordPatch,
) -> Result<()> {
    patch.validate().map_err(fail)?;
    let updated = ctx
        .toolbox()?
        .apply_update(zone, record_id, patch)
        .await
        .map_err(fail)?;
    show_record(&ctx, "Updated", &updated)
}

async fn delete_record(
    ctx: Context,
    zone: Option<String>,
    record_id: &str,
    confirm: bool,
) -> Result<()> {
    anyhow::ensure!(
        confirm,
        "Refusing to delete record {record_id} without --confirm; deletion is permanent"
    );

    let zone = ctx.zone(zone)?;
    let deleted = ctx
        .toolbox()?
        .apply_delete(&zone, record_id, confirm)
        .await
        .map_err(fail)?;

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deleted)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&deleted)?),
        OutputFormat::Csv => print!("{}", to_csv(&[deleted])?),
        OutputFormat::Pretty => {
            println!("{} record {}", "Deleted".red().bold(), deleted.id.cyan());
        }
    }
    Ok(())
}

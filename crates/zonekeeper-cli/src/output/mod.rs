//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::Tabled;
use zonekeeper::{to_concise, ConciseRecord, FormattedRecord, TtlView, Zone};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, json, csv, yaml"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// One record as a table or CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub record_type: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Content")]
    pub content: String,
    #[tabled(rename = "TTL")]
    pub ttl: String,
    #[tabled(rename = "Proxied")]
    pub proxied: String,
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[tabled(rename = "Comment")]
    pub comment: String,
}

impl From<&ConciseRecord> for RecordRow {
    fn from(r: &ConciseRecord) -> Self {
        Self {
            id: r.id.clone(),
            record_type: r.record_type.to_string(),
            name: r.name.clone(),
            content: r.content.clone(),
            ttl: match r.ttl {
                TtlView::Seconds(s) => s.to_string(),
                TtlView::Marker(m) => m.to_string(),
            },
            proxied: r.proxied.map(|p| p.to_string()).unwrap_or_default(),
            priority: r.priority.map(|p| p.to_string()).unwrap_or_default(),
            comment: r.comment.clone().unwrap_or_default(),
        }
    }
}

impl From<&FormattedRecord> for RecordRow {
    fn from(r: &FormattedRecord) -> Self {
        match r {
            FormattedRecord::Concise(c) => c.into(),
            FormattedRecord::Full(full) => (&to_concise(full)).into(),
        }
    }
}

/// One zone as a table or CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ZoneRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Paused")]
    pub paused: bool,
    #[tabled(rename = "Name Servers")]
    pub name_servers: String,
}

impl From<&Zone> for ZoneRow {
    fn from(z: &Zone) -> Self {
        Self {
            id: z.id.clone(),
            name: z.name.clone(),
            status: z.status.to_string(),
            paused: z.paused,
            name_servers: z.name_servers.join(" "),
        }
    }
}

/// Serialize rows as CSV with a header line.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Clip a cell to `max` characters.
pub fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn concise() -> ConciseRecord {
        let record = serde_json::from_value(json!({
            "id": "r1", "type": "MX", "name": "example.com", "content": "mx.example.com",
            "ttl": 1, "priority": 10
        }))
        .unwrap();
        to_concise(&record)
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_record_row() {
        let row = RecordRow::from(&concise());
        assert_eq!(row.ttl, "auto");
        assert_eq!(row.priority, "10");
        assert_eq!(row.proxied, "");
    }

    #[test]
    fn test_csv_has_header() {
        let csv = to_csv(&[RecordRow::from(&concise())]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,type,name,content,ttl,proxied,priority,comment")
        );
        assert_eq!(lines.next(), Some("r1,MX,example.com,mx.example.com,auto,,10,"));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghij", 5), "abcd…");
    }
}

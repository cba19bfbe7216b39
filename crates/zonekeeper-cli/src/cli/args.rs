//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use zonekeeper::{RecordType, SortField, Ttl, ZoneStatus};

use crate::output::OutputFormat;

/// Query and edit DNS zones without flooding your terminal
///
/// Large zones are summarized, sampled or paginated; every response is
/// bounded in size. Mutations are validated locally before anything is sent.
#[derive(Parser, Debug)]
#[command(name = "zk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// API token (or set ZONEKEEPER_API_TOKEN)
    #[arg(short = 't', long, env = "ZONEKEEPER_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Directory API base URL (or set ZONEKEEPER_BASE_URL)
    #[arg(long, env = "ZONEKEEPER_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and inspect zones
    Zones(ZonesArgs),

    /// Query, inspect and edit records
    Records(RecordsArgs),

    /// Create or update many records from a JSON file
    Bulk(BulkArgs),

    /// Print a zone in zone-file format
    Export(ExportArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Zones command
// ============================================================================

#[derive(Args, Debug)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub command: ZonesCommands,
}

#[derive(Subcommand, Debug)]
pub enum ZonesCommands {
    /// List zones visible to the token
    List {
        /// Exact domain name
        #[arg(long)]
        name: Option<String>,

        /// Zone status (active, pending, ...)
        #[arg(long, value_parser = parse_zone_status)]
        status: Option<ZoneStatus>,

        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Zones per page (1-100)
        #[arg(long, default_value = "20")]
        per_page: u32,
    },

    /// Show one zone
    Get {
        /// Zone identifier
        zone_id: String,
    },
}

// ============================================================================
// Records command
// ============================================================================

#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommands,
}

/// Record criteria shared by queries
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Record type (A, AAAA, CNAME, MX, TXT, ...)
    #[arg(long = "type")]
    pub record_type: Option<RecordType>,

    /// Name contains (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Content contains (case-insensitive)
    #[arg(long)]
    pub content: Option<String>,

    /// Comment contains (case-insensitive)
    #[arg(long)]
    pub comment: Option<String>,

    /// Proxy status
    #[arg(long)]
    pub proxied: Option<bool>,

    /// Tag name or name:value
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommands {
    /// Filter, summarize, sample or page through a zone's records
    Query {
        /// Zone identifier (defaults to default_zone from config)
        #[arg(short, long)]
        zone: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Only show counts by type and proxy status
        #[arg(long)]
        summary: bool,

        /// Show a random sample instead of a page
        #[arg(long)]
        sample: bool,

        /// Records to sample (1-50)
        #[arg(long, default_value = "5")]
        sample_size: u32,

        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Records per page (1-100)
        #[arg(long, default_value = "20")]
        per_page: u32,

        /// Sort field (type, name, content, ttl, proxied)
        #[arg(long)]
        sort_by: Option<SortField>,

        /// Show every field instead of the concise view
        #[arg(long)]
        full: bool,
    },

    /// Show one record
    Get {
        /// Record identifier
        record_id: String,

        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,

        /// Show every field instead of the concise view
        #[arg(long)]
        full: bool,
    },

    /// Create a record
    Create {
        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,

        /// Record type
        #[arg(long = "type")]
        record_type: RecordType,

        /// Record name
        #[arg(long)]
        name: String,

        /// Record content
        #[arg(long, default_value = "")]
        content: String,

        /// TTL in seconds (30-86400) or "auto"
        #[arg(long, value_parser = parse_ttl, default_value = "auto")]
        ttl: Ttl,

        /// Proxy traffic (A, AAAA and CNAME only)
        #[arg(long)]
        proxied: Option<bool>,

        /// Comment (max 100 characters)
        #[arg(long)]
        comment: Option<String>,

        /// Priority (MX, URI)
        #[arg(long)]
        priority: Option<u16>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Change fields of a record
    Update {
        /// Record identifier
        record_id: String,

        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,

        /// New record type
        #[arg(long = "type")]
        record_type: Option<RecordType>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New TTL in seconds or "auto"
        #[arg(long, value_parser = parse_ttl)]
        ttl: Option<Ttl>,

        /// New proxy status
        #[arg(long)]
        proxied: Option<bool>,

        /// New comment (empty to clear)
        #[arg(long)]
        comment: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<u16>,
    },

    /// Delete a record (requires --confirm)
    Delete {
        /// Record identifier
        record_id: String,

        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,

        /// Confirm the permanent deletion
        #[arg(long)]
        confirm: bool,
    },
}

// ============================================================================
// Bulk command
// ============================================================================

#[derive(Args, Debug)]
pub struct BulkArgs {
    #[command(subcommand)]
    pub command: BulkCommands,
}

#[derive(Subcommand, Debug)]
pub enum BulkCommands {
    /// Create records listed in a JSON array
    Create {
        /// JSON file with an array of records
        file: PathBuf,

        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Update records listed in a JSON array of {"id", ...fields}
    Update {
        /// JSON file with an array of updates
        file: PathBuf,

        /// Zone identifier
        #[arg(short, long)]
        zone: Option<String>,
    },
}

// ============================================================================
// Export command
// ============================================================================

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Zone identifier (defaults to default_zone from config)
    pub zone: Option<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}

/// Parse "auto" or a number of seconds
pub fn parse_ttl(s: &str) -> Result<Ttl, String> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(Ttl::Auto);
    }
    s.parse::<u32>()
        .map(Ttl::from)
        .map_err(|_| format!("invalid TTL '{s}': use \"auto\" or a number of seconds"))
}

fn parse_zone_status(s: &str) -> Result<ZoneStatus, String> {
    serde_json::from_value(serde_json::Value::String(s.to_ascii_lowercase()))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("auto").unwrap(), Ttl::Auto);
        assert_eq!(parse_ttl("AUTO").unwrap(), Ttl::Auto);
        assert_eq!(parse_ttl("300").unwrap(), Ttl::Seconds(300));
        assert!(parse_ttl("soon").is_err());
    }

    #[test]
    fn test_query_flags() {
        let cli = Cli::parse_from([
            "zk", "records", "query", "-z", "z1", "--type", "mx", "--sort-by", "name", "--page",
            "2",
        ]);
        let Commands::Records(RecordsArgs {
            command:
                RecordsCommands::Query {
                    zone,
                    filter,
                    page,
                    sort_by,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected records query");
        };
        assert_eq!(zone.as_deref(), Some("z1"));
        assert_eq!(filter.record_type, Some(RecordType::MX));
        assert_eq!(page, 2);
        assert_eq!(sort_by, Some(SortField::Name));
    }
}

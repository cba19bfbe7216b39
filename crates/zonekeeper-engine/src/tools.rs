//! Request/response operations over a Directory.
//!
//! Every operation returns a [`ToolOutput`]: pretty JSON (or zone file text)
//! bounded by the size guard, or a readable error message. Input is checked
//! before any Directory call is made.

use crate::bulk::{update_checked, BulkEngine, BulkReport};
use crate::config::EngineConfig;
use crate::format::{format, FormattedRecord};
use crate::query::{QueryEngine, RecordQuery, ResponseEnvelope, MAX_PER_PAGE};
use crate::size_guard::SizeGuard;
use serde::Serialize;
use tracing::debug;
use zonekeeper_core::{
    BulkUpdateItem, Directory, NewRecord, RecordPatch, Result, Zone, ZoneError, ZoneFilter,
};

/// Text handed back to the caller of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub is_error: bool,
    pub text: String,
}

impl ToolOutput {
    fn ok(text: String) -> Self {
        Self {
            is_error: false,
            text,
        }
    }

    fn error(err: &ZoneError) -> Self {
        Self {
            is_error: true,
            text: format!("Error: {}", err.describe()),
        }
    }
}

/// One page of zones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneList {
    pub zones: Vec<Zone>,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    pub has_more: bool,
}

/// Acknowledgement of a deleted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

/// Operation surface bound to one Directory
pub struct Toolbox<'a> {
    directory: &'a dyn Directory,
    config: EngineConfig,
    guard: SizeGuard,
}

impl<'a> Toolbox<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self::with_config(directory, EngineConfig::default())
    }

    pub fn with_config(directory: &'a dyn Directory, config: EngineConfig) -> Self {
        Self {
            directory,
            config,
            guard: SizeGuard::new(config.max_response_chars),
        }
    }

    /// Query engine sharing this toolbox's Directory and settings
    #[must_use]
    pub fn query_engine(&self) -> QueryEngine<'a> {
        QueryEngine::new(self.directory, self.config)
    }

    /// Bulk engine sharing this toolbox's Directory
    #[must_use]
    pub fn bulk_engine(&self) -> BulkEngine<'a> {
        BulkEngine::new(self.directory)
    }

    /// List zones visible to the token
    pub async fn list_zones(&self, filter: &ZoneFilter, page: u32, per_page: u32) -> ToolOutput {
        self.respond(self.fetch_zones(filter, page, per_page).await)
    }

    /// Fetch one zone
    pub async fn get_zone(&self, zone_id: &str) -> ToolOutput {
        let result = match require("zone_id", zone_id) {
            Ok(()) => self.directory.get_zone(zone_id).await,
            Err(e) => Err(e),
        };
        self.respond(result)
    }

    /// Filter, shape and bound a zone's records
    pub async fn query_records(&self, query: &RecordQuery) -> ToolOutput {
        self.respond(self.run_query(query).await)
    }

    /// Fetch one record
    pub async fn get_record(&self, zone_id: &str, record_id: &str, concise: bool) -> ToolOutput {
        self.respond(self.fetch_record(zone_id, record_id, concise).await)
    }

    /// Create one record
    pub async fn create_record(&self, zone_id: &str, record: &NewRecord) -> ToolOutput {
        self.respond(self.apply_create(zone_id, record).await)
    }

    /// Change fields of one record
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> ToolOutput {
        self.respond(self.apply_update(zone_id, record_id, patch).await)
    }

    /// Delete one record; refused unless `confirm` is set
    pub async fn delete_record(&self, zone_id: &str, record_id: &str, confirm: bool) -> ToolOutput {
        self.respond(self.apply_delete(zone_id, record_id, confirm).await)
    }

    /// Create a batch of records in order
    pub async fn bulk_create(&self, zone_id: &str, records: &[NewRecord]) -> ToolOutput {
        let report: Result<BulkReport> = self.bulk_engine().create(zone_id, records).await;
        self.respond(report)
    }

    /// Apply a batch of updates in order
    pub async fn bulk_update(&self, zone_id: &str, items: &[BulkUpdateItem]) -> ToolOutput {
        let report: Result<BulkReport> = self.bulk_engine().update(zone_id, items).await;
        self.respond(report)
    }

    /// Export the zone in zone-file format
    pub async fn export_zone(&self, zone_id: &str) -> ToolOutput {
        let result = match require("zone_id", zone_id) {
            Ok(()) => self.directory.export_zone(zone_id).await,
            Err(e) => return ToolOutput::error(&e),
        };
        match result {
            Ok(text) => ToolOutput::ok(self.guard.enforce(&text).into_owned()),
            Err(e) => ToolOutput::error(&e),
        }
    }

    // Typed entry points, rendered by the CLI itself

    pub async fn fetch_zones(
        &self,
        filter: &ZoneFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ZoneList> {
        check_page(page, per_page)?;
        let listing = self.directory.list_zones(filter, page, per_page).await?;
        Ok(ZoneList {
            has_more: listing.has_next(),
            page: listing.page,
            per_page: listing.per_page,
            total_count: listing.total_count,
            zones: listing.items,
        })
    }

    pub async fn run_query(&self, query: &RecordQuery) -> Result<ResponseEnvelope> {
        self.query_engine().run(query).await
    }

    pub async fn fetch_record(
        &self,
        zone_id: &str,
        record_id: &str,
        concise: bool,
    ) -> Result<FormattedRecord> {
        require("zone_id", zone_id)?;
        require("record_id", record_id)?;
        let record = self.directory.get_record(zone_id, record_id).await?;
        Ok(format(record, concise))
    }

    pub async fn apply_create(&self, zone_id: &str, record: &NewRecord) -> Result<FormattedRecord> {
        require("zone_id", zone_id)?;
        record.validate()?;
        let created = self.directory.create_record(zone_id, record).await?;
        Ok(format(created, true))
    }

    pub async fn apply_update(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<FormattedRecord> {
        require("zone_id", zone_id)?;
        require("record_id", record_id)?;
        let updated = update_checked(self.directory, zone_id, record_id, patch).await?;
        Ok(format(updated, true))
    }

    pub async fn apply_delete(&self, zone_id: &str, record_id: &str, confirm: bool) -> Result<Deleted> {
        if !confirm {
            return Err(ZoneError::invalid(
                "deleting a record requires confirm=true; deletion is permanent",
            ));
        }
        require("zone_id", zone_id)?;
        require("record_id", record_id)?;
        self.directory.delete_record(zone_id, record_id).await?;
        Ok(Deleted {
            id: record_id.to_string(),
            deleted: true,
        })
    }

    fn respond<T: Serialize>(&self, result: Result<T>) -> ToolOutput {
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "operation failed");
                return ToolOutput::error(&e);
            }
        };
        match serde_json::to_string_pretty(&value) {
            Ok(json) => ToolOutput::ok(self.guard.enforce(&json).into_owned()),
            Err(e) => ToolOutput::error(&ZoneError::from(e)),
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZoneError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_page(page: u32, per_page: u32) -> Result<()> {
    if page == 0 {
        return Err(ZoneError::invalid("page must be 1 or greater"));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(ZoneError::invalid(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
        )));
    }
    Ok(())
}

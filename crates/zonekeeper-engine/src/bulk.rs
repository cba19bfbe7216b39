//! Sequential bulk create/update with per-item failure containment.
//!
//! Items are applied strictly in input order, one Directory call at a time.
//! A failed item is recorded in its outcome and the batch moves on; nothing
//! is rolled back, so a partially failed batch leaves the successful changes
//! in place.

use crate::format::{to_concise, ConciseRecord};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{info, warn};
use zonekeeper_core::{
    BulkUpdateItem, Directory, NewRecord, Record, RecordPatch, Result, ZoneError,
};

/// Largest accepted batch
pub const MAX_BATCH: usize = 100;

/// Kind of bulk mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    Create,
    Update,
}

impl BulkOperation {
    /// Key under which the success count is reported
    #[must_use]
    pub const fn success_key(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
        }
    }
}

/// Result of one item of a batch
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BulkOutcome {
    /// Position in the input batch (0-based)
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ConciseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkOutcome {
    fn from_result(index: usize, result: Result<Record>) -> Self {
        match result {
            Ok(record) => Self {
                index,
                success: true,
                record: Some(to_concise(&record)),
                error: None,
            },
            Err(e) => Self {
                index,
                success: false,
                record: None,
                error: Some(e.describe()),
            },
        }
    }
}

/// Totals and ordered outcomes of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BulkReport {
    pub operation: BulkOperation,
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub results: Vec<BulkOutcome>,
}

impl BulkReport {
    fn new(operation: BulkOperation, results: Vec<BulkOutcome>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            operation,
            succeeded,
            failed: results.len() - succeeded,
            total: results.len(),
            results,
        }
    }
}

impl Serialize for BulkReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BulkReport", 4)?;
        s.serialize_field(self.operation.success_key(), &self.succeeded)?;
        s.serialize_field("failed", &self.failed)?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("results", &self.results)?;
        s.end()
    }
}

/// Applies batches of mutations to one zone
pub struct BulkEngine<'a> {
    directory: &'a dyn Directory,
}

impl<'a> BulkEngine<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self { directory }
    }

    /// Create every record in order
    pub async fn create(&self, zone_id: &str, records: &[NewRecord]) -> Result<BulkReport> {
        check_batch(zone_id, records.len())?;

        let mut results = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = match record.validate() {
                Ok(()) => self.directory.create_record(zone_id, record).await,
                Err(e) => Err(e),
            };
            if let Err(ref e) = result {
                warn!(zone = %zone_id, index, error = %e, "bulk create item failed");
            }
            results.push(BulkOutcome::from_result(index, result));
        }

        let report = BulkReport::new(BulkOperation::Create, results);
        info!(
            zone = %zone_id,
            created = report.succeeded,
            failed = report.failed,
            "bulk create finished"
        );
        Ok(report)
    }

    /// Apply every update in order
    pub async fn update(&self, zone_id: &str, items: &[BulkUpdateItem]) -> Result<BulkReport> {
        check_batch(zone_id, items.len())?;

        let mut results = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = if item.id.trim().is_empty() {
                Err(ZoneError::invalid("record id must not be empty"))
            } else {
                update_checked(self.directory, zone_id, &item.id, &item.patch).await
            };
            if let Err(ref e) = result {
                warn!(zone = %zone_id, index, id = %item.id, error = %e, "bulk update item failed");
            }
            results.push(BulkOutcome::from_result(index, result));
        }

        let report = BulkReport::new(BulkOperation::Update, results);
        info!(
            zone = %zone_id,
            updated = report.succeeded,
            failed = report.failed,
            "bulk update finished"
        );
        Ok(report)
    }
}

/// Validate a patch, consulting the stored record when the patch alone cannot
/// tell whether `proxied` is allowed, then apply it
pub(crate) async fn update_checked(
    directory: &dyn Directory,
    zone_id: &str,
    record_id: &str,
    patch: &RecordPatch,
) -> Result<Record> {
    patch.validate()?;
    if patch.needs_current_type() {
        let current = directory.get_record(zone_id, record_id).await?;
        patch.validate_against(&current.record_type)?;
    }
    directory.update_record(zone_id, record_id, patch).await
}

fn check_batch(zone_id: &str, len: usize) -> Result<()> {
    if zone_id.trim().is_empty() {
        return Err(ZoneError::invalid("zone_id must not be empty"));
    }
    if len == 0 {
        return Err(ZoneError::invalid("batch must contain at least one item"));
    }
    if len > MAX_BATCH {
        return Err(ZoneError::invalid(format!(
            "batch of {len} items exceeds the limit of {MAX_BATCH}"
        )));
    }
    Ok(())
}

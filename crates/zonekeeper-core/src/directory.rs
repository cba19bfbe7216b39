//! The Directory: the remote system of record for zones and records.

use crate::types::{NewRecord, QueryFilter, Record, RecordPatch, Zone, ZoneFilter};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of a Directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// 1-based page number
    pub page: u32,

    /// Requested page size
    pub per_page: u32,

    /// Total matching items across all pages, if the Directory reported it
    pub total_count: Option<usize>,
}

impl<T> ListPage<T> {
    /// Returns true if another page may follow this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        match self.total_count {
            Some(total) => (self.page as usize) * (self.per_page as usize) < total,
            None => self.items.len() >= self.per_page as usize && !self.items.is_empty(),
        }
    }
}

/// CRUD access to zones and records
///
/// Server-side filtering in [`Directory::list_records`] is best-effort; callers
/// that need exact results re-apply the filter to what comes back.
#[async_trait]
pub trait Directory: Send + Sync {
    /// List zones visible to the credentials
    async fn list_zones(&self, filter: &ZoneFilter, page: u32, per_page: u32)
        -> Result<ListPage<Zone>>;

    /// Fetch one zone
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;

    /// List one page of records in a zone
    async fn list_records(
        &self,
        zone_id: &str,
        filter: &QueryFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ListPage<Record>>;

    /// Fetch one record
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record>;

    /// Create a record
    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<Record>;

    /// Apply a partial update to a record
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record>;

    /// Delete a record
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// Export the zone in standard zone-file format
    async fn export_zone(&self, zone_id: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: usize, page: u32, per_page: u32, total: Option<usize>) -> ListPage<u32> {
        ListPage {
            items: (0..items as u32).collect(),
            page,
            per_page,
            total_count: total,
        }
    }

    #[test]
    fn test_has_next_with_total() {
        assert!(page(100, 1, 100, Some(150)).has_next());
        assert!(!page(50, 2, 100, Some(150)).has_next());
        assert!(!page(100, 1, 100, Some(100)).has_next());
    }

    #[test]
    fn test_has_next_without_total() {
        assert!(page(100, 1, 100, None).has_next());
        assert!(!page(99, 1, 100, None).has_next());
        assert!(!page(0, 3, 100, None).has_next());
    }
}

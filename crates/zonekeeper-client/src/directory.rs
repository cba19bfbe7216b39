//! [`Directory`] implementation backed by the HTTP API.

use crate::DirectoryClient;
use async_trait::async_trait;
use zonekeeper_core::{
    Directory, ListPage, NewRecord, QueryFilter, Record, RecordPatch, Result, Zone, ZoneFilter,
};

#[async_trait]
impl Directory for DirectoryClient {
    async fn list_zones(
        &self,
        filter: &ZoneFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ListPage<Zone>> {
        self.zones()
            .list()
            .filter(filter.clone())
            .page(page)
            .per_page(per_page)
            .send()
            .await
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        self.zones().get(zone_id).await
    }

    async fn list_records(
        &self,
        zone_id: &str,
        filter: &QueryFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ListPage<Record>> {
        self.records(zone_id)
            .list()
            .filter(filter.clone())
            .page(page)
            .per_page(per_page)
            .send()
            .await
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record> {
        self.records(zone_id).get(record_id).await
    }

    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<Record> {
        self.records(zone_id).create(record).await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record> {
        self.records(zone_id).update(record_id, patch).await
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.records(zone_id).delete(record_id).await
    }

    async fn export_zone(&self, zone_id: &str) -> Result<String> {
        self.records(zone_id).export().await
    }
}

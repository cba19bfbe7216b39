//! DNS record API endpoints.

use crate::client::Envelope;
use crate::DirectoryClient;
use zonekeeper_core::{ListPage, NewRecord, QueryFilter, Record, RecordPatch, Result};

/// DNS record endpoints scoped to one zone
pub struct RecordsApi<'a> {
    client: &'a DirectoryClient,
    zone_id: &'a str,
}

impl<'a> RecordsApi<'a> {
    pub(crate) const fn new(client: &'a DirectoryClient, zone_id: &'a str) -> Self {
        Self { client, zone_id }
    }

    fn base(&self) -> String {
        format!("/zones/{}/dns_records", self.zone_id)
    }

    /// List records with server-side filtering
    #[must_use]
    pub fn list(&self) -> RecordListBuilder<'a> {
        RecordListBuilder::new(self.client, self.zone_id)
    }

    /// Get a single record
    pub async fn get(&self, record_id: &str) -> Result<Record> {
        let envelope: Envelope<Record> = self
            .client
            .get_with_query(&format!("{}/{record_id}", self.base()), &[])
            .await?;
        envelope.into_result()
    }

    /// Create a record
    pub async fn create(&self, record: &NewRecord) -> Result<Record> {
        let envelope: Envelope<Record> = self.client.post(&self.base(), record).await?;
        envelope.into_result()
    }

    /// Update the given fields of a record
    pub async fn update(&self, record_id: &str, patch: &RecordPatch) -> Result<Record> {
        let envelope: Envelope<Record> = self
            .client
            .patch(&format!("{}/{record_id}", self.base()), patch)
            .await?;
        envelope.into_result()
    }

    /// Delete a record
    pub async fn delete(&self, record_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{record_id}", self.base()))
            .await
    }

    /// Export the zone as a BIND-style zone file
    pub async fn export(&self) -> Result<String> {
        self.client
            .get_text(&format!("{}/export", self.base()))
            .await
    }
}

/// Builder for record listings
pub struct RecordListBuilder<'a> {
    client: &'a DirectoryClient,
    zone_id: &'a str,
    filter: QueryFilter,
    page: u32,
    per_page: u32,
}

impl<'a> RecordListBuilder<'a> {
    fn new(client: &'a DirectoryClient, zone_id: &'a str) -> Self {
        Self {
            client,
            zone_id,
            filter: QueryFilter::default(),
            page: 1,
            per_page: 100,
        }
    }

    /// Apply record criteria
    #[must_use]
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the page number (1-indexed)
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<ListPage<Record>> {
        let mut params = filter_params(&self.filter);
        params.push(("page", self.page.to_string()));
        params.push(("per_page", self.per_page.to_string()));

        let envelope: Envelope<Vec<Record>> = self
            .client
            .get_with_query(&format!("/zones/{}/dns_records", self.zone_id), &params)
            .await?;
        let info = envelope.result_info.unwrap_or_default();
        let items = envelope.into_result()?;

        Ok(ListPage {
            items,
            page: info.page.unwrap_or(self.page),
            per_page: info.per_page.unwrap_or(self.per_page),
            total_count: info.total_count,
        })
    }
}

/// Translate a filter into the Directory's query parameters
pub(crate) fn filter_params(filter: &QueryFilter) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(ref t) = filter.record_type {
        params.push(("type", t.to_string()));
    }
    if let Some(ref name) = filter.name {
        params.push(("name.contains", name.clone()));
    }
    if let Some(ref content) = filter.content {
        params.push(("content.contains", content.clone()));
    }
    if let Some(ref comment) = filter.comment {
        params.push(("comment.contains", comment.clone()));
    }
    if let Some(proxied) = filter.proxied {
        params.push(("proxied", proxied.to_string()));
    }
    if let Some(ref tag) = filter.tag {
        if tag.contains(':') {
            params.push(("tag", tag.clone()));
        } else {
            params.push(("tag.present", tag.clone()));
        }
    }
    if !params.is_empty() {
        params.push(("match", "all".to_string()));
    }

    params
}

//! Zone API endpoints.

use crate::client::Envelope;
use crate::DirectoryClient;
use zonekeeper_core::{ListPage, Result, Zone, ZoneFilter};

/// Zone API endpoints
pub struct ZonesApi<'a> {
    client: &'a DirectoryClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) const fn new(client: &'a DirectoryClient) -> Self {
        Self { client }
    }

    /// List zones visible to the token
    #[must_use]
    pub fn list(&self) -> ZoneListBuilder<'a> {
        ZoneListBuilder::new(self.client)
    }

    /// Get details of a single zone
    pub async fn get(&self, zone_id: &str) -> Result<Zone> {
        let envelope: Envelope<Zone> = self
            .client
            .get_with_query(&format!("/zones/{zone_id}"), &[])
            .await?;
        envelope.into_result()
    }
}

/// Builder for zone listings
pub struct ZoneListBuilder<'a> {
    client: &'a DirectoryClient,
    filter: ZoneFilter,
    page: u32,
    per_page: u32,
}

impl<'a> ZoneListBuilder<'a> {
    fn new(client: &'a DirectoryClient) -> Self {
        Self {
            client,
            filter: ZoneFilter::default(),
            page: 1,
            per_page: 20,
        }
    }

    /// Apply name/status criteria
    #[must_use]
    pub fn filter(mut self, filter: ZoneFilter) -> Self {
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
    pub async fn send(self) -> Result<ListPage<Zone>> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];

        if let Some(name) = self.filter.name {
            params.push(("name", name));
        }

        if let Some(status) = self.filter.status {
            params.push(("status", status.to_string()));
        }

        let envelope: Envelope<Vec<Zone>> = self.client.get_with_query("/zones", &params).await?;
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

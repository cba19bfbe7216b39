//! Command implementations.

pub mod bulk;
pub mod config;
pub mod export;
pub mod records;
pub mod zones;

use zonekeeper::{
    shared, ClientConfig, DirectoryClient, EngineConfig, SizeGuard, Toolbox, ZoneError,
    DEFAULT_BASE_URL,
};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory API token
    pub api_token: Option<String>,

    /// Directory API base URL
    pub base_url: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Engine settings (response budget and fetch policy)
    pub engine: EngineConfig,

    /// Zone used when a command omits one
    pub default_zone: Option<String>,
}

impl Context {
    /// Get the API token, returning an error if not set.
    pub fn require_api_token(&self) -> anyhow::Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "API token required.\n\n\
                 Set it with one of:\n  \
                 1. --api-token <TOKEN>\n  \
                 2. ZONEKEEPER_API_TOKEN environment variable\n  \
                 3. zk config set api_token <TOKEN>"
            )
        })
    }

    /// Resolve the zone argument, falling back to the configured default.
    pub fn zone(&self, zone: Option<String>) -> anyhow::Result<String> {
        zone.or_else(|| self.default_zone.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "Zone required.\n\n\
                 Pass --zone <ZONE_ID> or set a default with:\n  \
                 zk config set default_zone <ZONE_ID>"
            )
        })
    }

    /// The process-wide Directory client.
    pub fn client(&self) -> anyhow::Result<&'static DirectoryClient> {
        let token = self.require_api_token()?;
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let client = shared(|| Ok(ClientConfig::new(token).base_url(base_url))).map_err(fail)?;
        Ok(client)
    }

    /// Operation surface over the shared client.
    pub fn toolbox(&self) -> anyhow::Result<Toolbox<'static>> {
        Ok(Toolbox::with_config(self.client()?, self.engine))
    }

    /// Size guard matching the configured budget.
    pub const fn guard(&self) -> SizeGuard {
        SizeGuard::new(self.engine.max_response_chars)
    }
}

/// Turn a Directory error into its readable form, hint included.
pub fn fail(err: ZoneError) -> anyhow::Error {
    anyhow::anyhow!(err.describe())
}

//! Process-wide Directory client handle.

use crate::{ClientConfig, DirectoryClient};
use std::sync::OnceLock;
use tracing::debug;
use zonekeeper_core::Result;

static SHARED: OnceLock<DirectoryClient> = OnceLock::new();

/// Return the process-wide client, building it on first use
///
/// Initialization is idempotent: if two callers race, both build a client and
/// the first one stored wins; the other is dropped. Later calls ignore `config`.
pub fn shared<F>(config: F) -> Result<&'static DirectoryClient>
where
    F: FnOnce() -> Result<ClientConfig>,
{
    if let Some(client) = SHARED.get() {
        return Ok(client);
    }

    let client = DirectoryClient::from_config(config()?)?;
    debug!("initialized shared directory client");
    Ok(SHARED.get_or_init(|| client))
}

/// The process-wide client, if it has been initialized
pub fn try_shared() -> Option<&'static DirectoryClient> {
    SHARED.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonekeeper_core::ZoneError;

    #[test]
    fn test_shared_initializes_once() {
        let first = shared(|| Ok(ClientConfig::new("token-a"))).unwrap();
        let second = shared(|| Err(ZoneError::Config("must not be called".into()))).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(try_shared().is_some());
    }
}

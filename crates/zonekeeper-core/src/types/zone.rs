use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Zone status as reported by the Directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Serving records
    Active,
    /// Waiting for nameserver delegation
    Pending,
    /// Being set up
    Initializing,
    /// Delegation moved away
    Moved,
    /// Removed
    Deleted,
    /// Disabled by an operator
    Deactivated,
    /// Status not recognized
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Initializing => "initializing",
            Self::Moved => "moved",
            Self::Deleted => "deleted",
            Self::Deactivated => "deactivated",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A zone: the namespace owning a set of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: String,

    /// Domain name
    pub name: String,

    /// Current status
    #[serde(default)]
    pub status: ZoneStatus,

    /// Whether the zone is paused
    #[serde(default)]
    pub paused: bool,

    /// Assigned nameservers
    #[serde(default)]
    pub name_servers: Vec<String>,

    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Criteria for listing zones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneFilter {
    /// Exact domain name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Zone status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ZoneStatus>,
}

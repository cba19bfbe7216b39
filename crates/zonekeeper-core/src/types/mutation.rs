use super::{RecordData, RecordType, Ttl};
use crate::{Result, ZoneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum comment length the Directory accepts
pub const MAX_COMMENT_LEN: usize = 100;

/// Smallest explicit TTL in seconds
pub const MIN_TTL: u32 = 30;

/// Largest explicit TTL in seconds
pub const MAX_TTL: u32 = 86_400;

/// Fields for creating a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNewRecord")]
pub struct NewRecord {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record name
    pub name: String,

    /// Primary value
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Time-to-live
    pub ttl: Ttl,

    /// Proxy flag (address and alias records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Labels
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// MX/URI priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// Structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RecordData>,
}

impl NewRecord {
    /// Start a record with automatic TTL and no optional fields
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            ttl: Ttl::Auto,
            proxied: None,
            comment: None,
            tags: Vec::new(),
            priority: None,
            data: None,
        }
    }

    /// Set the TTL
    #[must_use]
    pub const fn ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the proxy flag
    #[must_use]
    pub const fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    /// Set the comment
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check the fields locally before any Directory call
    pub fn validate(&self) -> Result<()> {
        if self.record_type.is_unknown() {
            return Err(ZoneError::invalid(format!(
                "unsupported record type '{}'",
                self.record_type
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ZoneError::invalid("record name must not be empty"));
        }
        if self.content.trim().is_empty() && self.data.is_none() {
            return Err(ZoneError::invalid(format!(
                "{} record '{}' needs content or a data payload",
                self.record_type, self.name
            )));
        }
        if self.record_type == RecordType::MX && self.priority.is_none() {
            return Err(ZoneError::invalid("MX records require a priority"));
        }
        validate_ttl(self.ttl)?;
        validate_proxied(self.proxied, Some(&self.record_type))?;
        validate_comment(self.comment.as_deref())
    }
}

/// Partial update; absent fields are left unchanged by the Directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// New record type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// New TTL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,

    /// New proxy flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// New comment; an empty string clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Replacement tag set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// Replacement structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RecordPatch {
    /// Returns true if the patch would change nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && self.name.is_none()
            && self.content.is_none()
            && self.ttl.is_none()
            && self.proxied.is_none()
            && self.comment.is_none()
            && self.tags.is_none()
            && self.priority.is_none()
            && self.data.is_none()
    }

    /// Check the fields locally before any Directory call
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ZoneError::invalid("update must change at least one field"));
        }
        if let Some(ref t) = self.record_type {
            if t.is_unknown() {
                return Err(ZoneError::invalid(format!("unsupported record type '{t}'")));
            }
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ZoneError::invalid("record name must not be empty"));
        }
        if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(ZoneError::invalid("record content must not be empty"));
        }
        if let Some(ttl) = self.ttl {
            validate_ttl(ttl)?;
        }
        validate_proxied(self.proxied, self.record_type.as_ref())?;
        validate_comment(self.comment.as_deref())
    }

    /// True when `proxied` is set but the type must come from the stored record
    #[must_use]
    pub const fn needs_current_type(&self) -> bool {
        self.proxied.is_some() && self.record_type.is_none()
    }

    /// Check the patch against the type of the record it targets
    pub fn validate_against(&self, current: &RecordType) -> Result<()> {
        validate_proxied(self.proxied, Some(self.record_type.as_ref().unwrap_or(current)))
    }
}

/// One entry of a bulk update batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateItem {
    /// Record to update
    pub id: String,

    /// Fields to change
    #[serde(flatten)]
    pub patch: RecordPatch,
}

fn validate_ttl(ttl: Ttl) -> Result<()> {
    match ttl {
        Ttl::Auto => Ok(()),
        Ttl::Seconds(s) if (MIN_TTL..=MAX_TTL).contains(&s) => Ok(()),
        Ttl::Seconds(s) => Err(ZoneError::invalid(format!(
            "ttl {s} out of range: use 1 (auto) or {MIN_TTL}-{MAX_TTL} seconds"
        ))),
    }
}

fn validate_proxied(proxied: Option<bool>, record_type: Option<&RecordType>) -> Result<()> {
    match (proxied, record_type) {
        (Some(_), Some(t)) if !t.is_proxiable() => Err(ZoneError::invalid(format!(
            "proxied can only be set on A, AAAA and CNAME records, not {t}"
        ))),
        _ => Ok(()),
    }
}

fn validate_comment(comment: Option<&str>) -> Result<()> {
    match comment {
        Some(c) if c.chars().count() > MAX_COMMENT_LEN => Err(ZoneError::invalid(format!(
            "comment exceeds {MAX_COMMENT_LEN} characters"
        ))),
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
struct RawNewRecord {
    #[serde(default, rename = "type")]
    record_type: RecordType,
    #[serde(default)]
    name: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    ttl: Ttl,
    #[serde(default)]
    proxied: Option<bool>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    priority: Option<u16>,
    #[serde(default)]
    data: Option<Value>,
}

impl From<RawNewRecord> for NewRecord {
    fn from(raw: RawNewRecord) -> Self {
        let data = raw
            .data
            .and_then(|value| RecordData::for_type(&raw.record_type, value));

        Self {
            record_type: raw.record_type,
            name: raw.name,
            content: raw.content,
            ttl: raw.ttl,
            proxied: raw.proxied,
            comment: raw.comment,
            tags: raw.tags,
            priority: raw.priority,
            data,
        }
    }
}

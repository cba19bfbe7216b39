//! Record projection: full fidelity or a concise decision-making view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use zonekeeper_core::{Record, RecordData, RecordType, Ttl};

/// Marker emitted in place of the automatic TTL sentinel
pub const AUTO_TTL_MARKER: &str = "auto";

/// A record as it leaves the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedRecord {
    /// Unchanged Directory record
    Full(Record),
    /// Minimal projection
    Concise(ConciseRecord),
}

impl FormattedRecord {
    /// The full record, if this is an identity projection
    #[must_use]
    pub fn into_full(self) -> Option<Record> {
        match self {
            Self::Full(record) => Some(record),
            Self::Concise(_) => None,
        }
    }

    /// Record identifier in either form
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Full(r) => &r.id,
            Self::Concise(c) => &c.id,
        }
    }
}

/// TTL as shown in concise output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TtlView {
    /// Explicit seconds
    Seconds(u32),
    /// The literal `"auto"`
    Marker(&'static str),
}

impl From<Ttl> for TtlView {
    fn from(ttl: Ttl) -> Self {
        match ttl {
            Ttl::Auto => Self::Marker(AUTO_TTL_MARKER),
            Ttl::Seconds(s) => Self::Seconds(s),
        }
    }
}

/// Fixed minimal field set of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConciseRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: TtlView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Project a record; `concise = false` returns it unchanged
#[must_use]
pub fn format(record: Record, concise: bool) -> FormattedRecord {
    if concise {
        FormattedRecord::Concise(to_concise(&record))
    } else {
        FormattedRecord::Full(record)
    }
}

/// Build the concise view of a record
///
/// Structured payload fields other than SRV priority/weight/port are dropped.
#[must_use]
pub fn to_concise(record: &Record) -> ConciseRecord {
    let proxied = record
        .record_type
        .is_proxiable()
        .then(|| record.is_proxied());

    let (priority, weight, port) = match record.record_type {
        RecordType::MX => (record.effective_priority(), None, None),
        RecordType::SRV => srv_fields(record.data.as_ref()),
        _ => (None, None, None),
    };

    ConciseRecord {
        id: record.id.clone(),
        record_type: record.record_type.clone(),
        name: record.name.clone(),
        content: record.content.clone(),
        ttl: record.ttl.into(),
        proxied,
        priority,
        weight,
        port,
        comment: record.has_comment().then(|| record.comment.clone()).flatten(),
        created_on: record.created_on,
        modified_on: record.modified_on,
    }
}

fn srv_fields(data: Option<&RecordData>) -> (Option<u16>, Option<u16>, Option<u16>) {
    match data {
        Some(RecordData::Srv(srv)) => (Some(srv.priority), Some(srv.weight), Some(srv.port)),
        Some(RecordData::Other(map)) => {
            let field = |key: &str| {
                map.get(key)
                    .and_then(Value::as_u64)
                    .and_then(|v| u16::try_from(v).ok())
            };
            (field("priority"), field("weight"), field("port"))
        }
        Some(RecordData::Caa(_)) | None => (None, None, None),
    }
}

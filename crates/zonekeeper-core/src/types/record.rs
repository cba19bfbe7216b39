use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Sentinel TTL value the Directory uses for "automatic"
pub const AUTO_TTL: u32 = 1;

/// DNS record types known to the Directory
///
/// Anything outside the known set lands in [`RecordType::Other`], trimmed and
/// uppercased like the known names so comparisons ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    AAAA,
    /// Certification authority authorization
    CAA,
    /// Certificate
    CERT,
    /// Canonical name (alias)
    CNAME,
    /// DNSSEC public key
    DNSKEY,
    /// Delegation signer
    DS,
    /// HTTPS service binding
    HTTPS,
    /// Geographic location
    LOC,
    /// Mail exchange
    MX,
    /// Naming authority pointer
    NAPTR,
    /// Nameserver
    NS,
    /// OpenPGP public key
    OPENPGPKEY,
    /// Reverse pointer
    PTR,
    /// S/MIME certificate association
    SMIMEA,
    /// Service locator
    SRV,
    /// SSH fingerprint
    SSHFP,
    /// General service binding
    SVCB,
    /// TLS certificate association
    TLSA,
    /// Text
    TXT,
    /// Uniform resource identifier
    URI,
    /// Unrecognized or missing type, uppercased
    Other(String),
}

impl RecordType {
    /// All types the Directory is known to serve
    pub const KNOWN: [Self; 21] = [
        Self::A,
        Self::AAAA,
        Self::CAA,
        Self::CERT,
        Self::CNAME,
        Self::DNSKEY,
        Self::DS,
        Self::HTTPS,
        Self::LOC,
        Self::MX,
        Self::NAPTR,
        Self::NS,
        Self::OPENPGPKEY,
        Self::PTR,
        Self::SMIMEA,
        Self::SRV,
        Self::SSHFP,
        Self::SVCB,
        Self::TLSA,
        Self::TXT,
        Self::URI,
    ];

    /// Canonical upper-case name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CAA => "CAA",
            Self::CERT => "CERT",
            Self::CNAME => "CNAME",
            Self::DNSKEY => "DNSKEY",
            Self::DS => "DS",
            Self::HTTPS => "HTTPS",
            Self::LOC => "LOC",
            Self::MX => "MX",
            Self::NAPTR => "NAPTR",
            Self::NS => "NS",
            Self::OPENPGPKEY => "OPENPGPKEY",
            Self::PTR => "PTR",
            Self::SMIMEA => "SMIMEA",
            Self::SRV => "SRV",
            Self::SSHFP => "SSHFP",
            Self::SVCB => "SVCB",
            Self::TLSA => "TLSA",
            Self::TXT => "TXT",
            Self::URI => "URI",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true if the type is outside the known set
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }

    /// Only address and alias records may be proxied
    #[must_use]
    pub const fn is_proxiable(&self) -> bool {
        matches!(self, Self::A | Self::AAAA | Self::CNAME)
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        let upper = s.trim().to_ascii_uppercase();
        Self::KNOWN
            .iter()
            .find(|t| t.as_str() == upper)
            .cloned()
            .unwrap_or(Self::Other(upper))
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Record time-to-live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Ttl {
    /// The Directory picks the TTL (wire value `1`)
    #[default]
    Auto,
    /// Explicit TTL in seconds
    Seconds(u32),
}

impl Ttl {
    /// Wire value, with [`AUTO_TTL`] standing in for automatic
    #[must_use]
    pub const fn as_secs(self) -> u32 {
        match self {
            Self::Auto => AUTO_TTL,
            Self::Seconds(s) => s,
        }
    }

    /// Returns true for the automatic sentinel
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        if secs == AUTO_TTL {
            Self::Auto
        } else {
            Self::Seconds(secs)
        }
    }
}

impl From<Ttl> for u32 {
    fn from(ttl: Ttl) -> Self {
        ttl.as_secs()
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Seconds(s) => write!(f, "{s}"),
        }
    }
}

/// SRV payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    /// Lower values are tried first
    pub priority: u16,
    /// Relative weight among equal priorities
    pub weight: u16,
    /// Service port
    pub port: u16,
    /// Target host
    pub target: String,
    /// Any other fields the Directory attached
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// CAA payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaData {
    /// Issuer critical flag
    pub flags: u8,
    /// Property tag (`issue`, `issuewild`, `iodef`)
    pub tag: String,
    /// Property value
    pub value: String,
    /// Any other fields the Directory attached
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type-specific structured payload of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordData {
    /// Service locator fields
    Srv(SrvData),
    /// Certification authority authorization fields
    Caa(CaaData),
    /// Any payload without a dedicated shape
    Other(Map<String, Value>),
}

impl RecordData {
    /// Interpret a raw payload according to the record type that owns it
    #[must_use]
    pub fn for_type(record_type: &RecordType, value: Value) -> Option<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return None,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                return Some(Self::Other(map));
            }
        };

        let typed = match record_type {
            RecordType::SRV => serde_json::from_value(Value::Object(map.clone()))
                .ok()
                .map(Self::Srv),
            RecordType::CAA => serde_json::from_value(Value::Object(map.clone()))
                .ok()
                .map(Self::Caa),
            _ => None,
        };

        Some(typed.unwrap_or(Self::Other(map)))
    }

    /// Priority carried in the payload, if any
    #[must_use]
    pub fn priority(&self) -> Option<u16> {
        match self {
            Self::Srv(srv) => Some(srv.priority),
            Self::Caa(_) => None,
            Self::Other(map) => map
                .get("priority")
                .and_then(Value::as_u64)
                .and_then(|p| u16::try_from(p).ok()),
        }
    }
}

/// A DNS record as stored by the Directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    /// Opaque identifier, unique within the zone
    pub id: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Fully-qualified record name
    pub name: String,

    /// Primary value; semantics depend on the type
    pub content: String,

    /// Time-to-live
    pub ttl: Ttl,

    /// Whether traffic is proxied (address and alias records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Labels attached to the record
    pub tags: Vec<String>,

    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    /// Last modification time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,

    /// Priority (MX and URI records)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// Type-specific structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RecordData>,

    /// Attributes without a typed field, kept for full-fidelity output
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Returns true if the record carries a non-empty comment
    #[must_use]
    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Proxy flag with absent treated as DNS-only
    #[must_use]
    pub fn is_proxied(&self) -> bool {
        self.proxied.unwrap_or(false)
    }

    /// Priority from the top-level field or the structured payload
    #[must_use]
    pub fn effective_priority(&self) -> Option<u16> {
        self.priority
            .or_else(|| self.data.as_ref().and_then(RecordData::priority))
    }
}

/// Wire shape of a record before the payload is keyed by type
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: String,
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
    created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    modified_on: Option<DateTime<Utc>>,
    #[serde(default)]
    priority: Option<u16>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        let data = raw
            .data
            .and_then(|value| RecordData::for_type(&raw.record_type, value));

        Self {
            id: raw.id,
            record_type: raw.record_type,
            name: raw.name,
            content: raw.content,
            ttl: raw.ttl,
            proxied: raw.proxied,
            comment: raw.comment,
            tags: raw.tags,
            created_on: raw.created_on,
            modified_on: raw.modified_on,
            priority: raw.priority,
            data,
            extra: raw.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_type_parsing() {
        assert_eq!(RecordType::from("cname"), RecordType::CNAME);
        assert_eq!(RecordType::from(" aaaa "), RecordType::AAAA);
        assert_eq!(RecordType::from("SPF"), RecordType::Other("SPF".into()));
        assert_eq!(RecordType::from(" spf"), RecordType::from("SPF"));
        assert!(RecordType::default().is_unknown());
        assert!(RecordType::A.is_proxiable());
        assert!(!RecordType::MX.is_proxiable());
        assert_eq!(RecordType::KNOWN.len(), 21);
    }

    #[test]
    fn test_ttl_sentinel() {
        let auto: Ttl = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(auto, Ttl::Auto);
        assert_eq!(serde_json::to_value(Ttl::Auto).unwrap(), json!(1));
        assert_eq!(Ttl::from(300), Ttl::Seconds(300));
        assert_eq!(Ttl::Auto.to_string(), "auto");
    }

    #[test]
    fn test_srv_payload_keyed_by_type() {
        let record: Record = serde_json::from_value(json!({
            "id": "r1",
            "type": "SRV",
            "name": "_sip._tcp.example.com",
            "content": "10 5 5060 sip.example.com",
            "ttl": 3600,
            "data": { "priority": 10, "weight": 5, "port": 5060, "target": "sip.example.com" }
        }))
        .unwrap();

        match record.data {
            Some(RecordData::Srv(ref srv)) => {
                assert_eq!(srv.port, 5060);
                assert_eq!(srv.weight, 5);
            }
            ref other => panic!("expected SRV payload, got {other:?}"),
        }
        assert_eq!(record.effective_priority(), Some(10));
    }

    #[test]
    fn test_payload_falls_back_to_open_map() {
        // Same shape as SRV, but a URI record must not be read as one.
        let record: Record = serde_json::from_value(json!({
            "id": "r2",
            "type": "URI",
            "name": "_ftp._tcp.example.com",
            "content": "",
            "ttl": 1,
            "data": { "priority": 1, "weight": 2, "target": "ftp://example.com" }
        }))
        .unwrap();

        assert!(matches!(record.data, Some(RecordData::Other(_))));
        assert_eq!(record.ttl, Ttl::Auto);
        assert_eq!(record.effective_priority(), Some(1));
    }

    #[test]
    fn test_full_record_keeps_unmodelled_fields() {
        let raw = json!({
            "id": "r3",
            "type": "A",
            "name": "www.example.com",
            "content": "192.0.2.1",
            "ttl": 300,
            "proxied": true,
            "tags": ["web"],
            "zone_name": "example.com",
            "meta": { "auto_added": false }
        });
        let record: Record = serde_json::from_value(raw).unwrap();
        assert_eq!(record.extra.get("zone_name"), Some(&json!("example.com")));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["meta"]["auto_added"], json!(false));
        assert_eq!(back["type"], json!("A"));
    }
}

//! Type distribution and proxy histogram of a record set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zonekeeper_core::Record;

/// Bucket for unknown or missing record types
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// Proxy-status histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxiedBreakdown {
    /// Records with the proxy flag set
    pub proxied: usize,
    /// Everything else, including records that carry no flag
    pub dns_only: usize,
}

/// Shape of a record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_proxied: ProxiedBreakdown,
}

impl ZoneSummary {
    /// Count of one type bucket
    #[must_use]
    pub fn count(&self, record_type: &str) -> usize {
        self.by_type.get(record_type).copied().unwrap_or(0)
    }
}

/// Aggregate records; each input lands in exactly one type and one proxy bucket
pub fn summarize<'a, I>(records: I) -> ZoneSummary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut summary = ZoneSummary::default();

    for record in records {
        summary.total += 1;

        let key = if record.record_type.is_unknown() {
            UNKNOWN_TYPE
        } else {
            record.record_type.as_str()
        };
        *summary.by_type.entry(key.to_string()).or_insert(0) += 1;

        if record.is_proxied() {
            summary.by_proxied.proxied += 1;
        } else {
            summary.by_proxied.dns_only += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(kind: &str, proxied: Option<bool>) -> Record {
        let mut v = json!({"id": "x", "type": kind, "name": "n", "content": "c", "ttl": 1});
        if let Some(p) = proxied {
            v["proxied"] = json!(p);
        }
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_empty_set() {
        let s = summarize(&Vec::<Record>::new());
        assert_eq!(s.total, 0);
        assert!(s.by_type.is_empty());
        assert_eq!(s.by_proxied, ProxiedBreakdown::default());
    }

    #[test]
    fn test_buckets_sum_to_total() {
        let records = vec![
            record("A", Some(true)),
            record("A", Some(false)),
            record("CNAME", Some(true)),
            record("MX", None),
            record("TXT", None),
            record("TXT", None),
        ];
        let s = summarize(&records);

        assert_eq!(s.total, 6);
        assert_eq!(s.by_type.values().sum::<usize>(), s.total);
        assert_eq!(s.by_proxied.proxied + s.by_proxied.dns_only, s.total);
        assert_eq!(s.count("TXT"), 2);
        assert_eq!(s.by_proxied.proxied, 2);
    }

    #[test]
    fn test_unknown_types_are_counted() {
        let mut missing: Record =
            serde_json::from_value(json!({"id": "m", "name": "n", "content": "c"})).unwrap();
        missing.proxied = None;
        let records = vec![record("SPF", None), missing, record("A", None)];
        let s = summarize(&records);

        assert_eq!(s.count(UNKNOWN_TYPE), 2);
        assert_eq!(s.count("A"), 1);
        assert_eq!(s.total, 3);
    }

    #[test]
    fn test_serialized_shape() {
        let s = summarize(&[record("A", Some(true))]);
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({"total": 1, "by_type": {"A": 1}, "by_proxied": {"proxied": 1, "dns_only": 0}})
        );
    }
}

use super::{Record, RecordType};
use serde::{Deserialize, Serialize};

/// Request-scoped record criteria, combined with logical AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Exact record type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    /// Substring of the record name (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Substring of the record content (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Substring of the record comment (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Exact proxy flag; records without one count as not proxied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Tag name (`env`) or full tag (`env:prod`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl QueryFilter {
    /// Create an empty filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one record type
    #[must_use]
    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Restrict to names containing `needle`
    #[must_use]
    pub fn name(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    /// Restrict to content containing `needle`
    #[must_use]
    pub fn content(mut self, needle: impl Into<String>) -> Self {
        self.content = Some(needle.into());
        self
    }

    /// Restrict to comments containing `needle`
    #[must_use]
    pub fn comment(mut self, needle: impl Into<String>) -> Self {
        self.comment = Some(needle.into());
        self
    }

    /// Restrict to one proxy state
    #[must_use]
    pub const fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    /// Restrict to records carrying `tag`
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns true if no criterion is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && self.name.is_none()
            && self.content.is_none()
            && self.comment.is_none()
            && self.proxied.is_none()
            && self.tag.is_none()
    }

    /// Test one record against every criterion
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref t) = self.record_type {
            if record.record_type != *t {
                return false;
            }
        }

        if !contains(self.name.as_deref(), Some(&record.name))
            || !contains(self.content.as_deref(), Some(&record.content))
            || !contains(self.comment.as_deref(), record.comment.as_deref())
        {
            return false;
        }

        if let Some(proxied) = self.proxied {
            if record.is_proxied() != proxied {
                return false;
            }
        }

        match self.tag.as_deref() {
            Some(tag) => record.tags.iter().any(|t| tag_matches(t, tag)),
            None => true,
        }
    }
}

fn contains(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(n), Some(h)) => h.to_lowercase().contains(&n.to_lowercase()),
    }
}

fn tag_matches(record_tag: &str, wanted: &str) -> bool {
    if record_tag == wanted {
        return true;
    }
    // A bare tag name matches any `name:value` tag.
    !wanted.contains(':')
        && record_tag
            .split_once(':')
            .is_some_and(|(name, _)| name == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let r = record(json!({"id": "1", "type": "TXT", "name": "a.example.com", "content": "x"}));
        assert!(QueryFilter::new().is_empty());
        assert!(QueryFilter::new().matches(&r));
    }

    #[test]
    fn test_criteria_are_anded() {
        let r = record(json!({
            "id": "1", "type": "A", "name": "API.example.com", "content": "192.0.2.10",
            "proxied": true, "comment": "primary backend", "tags": ["env:prod", "team"]
        }));

        assert!(QueryFilter::new().record_type(RecordType::A).name("api").matches(&r));
        assert!(QueryFilter::new().content("192.0.2").proxied(true).matches(&r));
        assert!(QueryFilter::new().comment("BACKEND").matches(&r));
        assert!(!QueryFilter::new().record_type(RecordType::A).proxied(false).matches(&r));
        assert!(!QueryFilter::new().name("api").content("198.51").matches(&r));
    }

    #[test]
    fn test_unknown_type_matches_regardless_of_case() {
        let r = record(json!({"id": "1", "type": "SPF", "name": "example.com", "content": "v=spf1 -all"}));
        let filter = QueryFilter::new().record_type("spf".parse::<RecordType>().unwrap());
        assert!(filter.matches(&r));
    }

    #[test]
    fn test_missing_comment_never_matches_comment_filter() {
        let r = record(json!({"id": "1", "type": "A", "name": "x", "content": "192.0.2.1"}));
        assert!(!QueryFilter::new().comment("anything").matches(&r));
        assert!(QueryFilter::new().proxied(false).matches(&r));
    }

    #[test]
    fn test_tag_matching() {
        let r = record(json!({"id": "1", "type": "A", "name": "x", "content": "y", "tags": ["env:prod", "legacy"]}));
        assert!(QueryFilter::new().tag("env").matches(&r));
        assert!(QueryFilter::new().tag("env:prod").matches(&r));
        assert!(QueryFilter::new().tag("legacy").matches(&r));
        assert!(!QueryFilter::new().tag("env:dev").matches(&r));
        assert!(!QueryFilter::new().tag("owner").matches(&r));
    }
}

//! Record queries: fetch, filter, then shape into one of three response forms.

use crate::config::EngineConfig;
use crate::format::{format, FormattedRecord};
use crate::paginate::{paginate, PageMeta};
use crate::sample::sample;
use crate::summary::{summarize, ZoneSummary};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::{debug, info};
use zonekeeper_core::{Directory, QueryFilter, Record, Result, ZoneError};

/// Default number of sampled records
pub const DEFAULT_SAMPLE_SIZE: u32 = 5;

/// Largest sample a caller may request
pub const MAX_SAMPLE_SIZE: u32 = 50;

/// Default page size of paginated responses
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page a caller may request
pub const MAX_PER_PAGE: u32 = 100;

/// Field to order paginated records by (ascending, stable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Type,
    Name,
    Content,
    Ttl,
    Proxied,
}

impl SortField {
    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::Type => a.record_type.as_str().cmp(b.record_type.as_str()),
            Self::Name => a.name.cmp(&b.name),
            Self::Content => a.content.cmp(&b.content),
            Self::Ttl => a.ttl.as_secs().cmp(&b.ttl.as_secs()),
            Self::Proxied => a.is_proxied().cmp(&b.is_proxied()),
        }
    }
}

impl FromStr for SortField {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "type" => Ok(Self::Type),
            "name" => Ok(Self::Name),
            "content" => Ok(Self::Content),
            "ttl" => Ok(Self::Ttl),
            "proxied" => Ok(Self::Proxied),
            other => Err(ZoneError::invalid(format!(
                "unknown sort field '{other}': use type, name, content, ttl or proxied"
            ))),
        }
    }
}

/// One record query as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Zone to query
    pub zone_id: String,

    /// Record criteria
    #[serde(default, flatten)]
    pub filter: QueryFilter,

    /// Return only the zone summary
    #[serde(default)]
    pub summary: bool,

    /// Return a random sample
    #[serde(default)]
    pub sample: bool,

    /// Sample size (1-50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,

    /// Page number (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size (1-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Ordering of paginated records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,

    /// Emit the concise projection instead of full records
    #[serde(default = "default_concise")]
    pub concise: bool,
}

const fn default_concise() -> bool {
    true
}

/// The single output form selected for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aggregate only
    Summary,
    /// Uniform random subset
    Sample {
        /// Records to draw
        size: usize,
    },
    /// One page of (optionally sorted) records
    Page {
        /// 1-based page number
        page: u32,
        /// Page size
        per_page: u32,
        /// Ordering, if any
        sort_by: Option<SortField>,
    },
}

impl RecordQuery {
    /// Paginated query over the whole zone with concise output
    pub fn new(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            filter: QueryFilter::default(),
            summary: false,
            sample: false,
            sample_size: None,
            page: None,
            per_page: None,
            sort_by: None,
            concise: true,
        }
    }

    /// Set the record criteria
    #[must_use]
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Request summary mode
    #[must_use]
    pub const fn summary(mut self) -> Self {
        self.summary = true;
        self
    }

    /// Request sample mode
    #[must_use]
    pub const fn sample(mut self, size: u32) -> Self {
        self.sample = true;
        self.sample_size = Some(size);
        self
    }

    /// Request a specific page
    #[must_use]
    pub const fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Order paginated records
    #[must_use]
    pub const fn sort_by(mut self, field: SortField) -> Self {
        self.sort_by = Some(field);
        self
    }

    /// Choose full or concise records
    #[must_use]
    pub const fn concise(mut self, concise: bool) -> Self {
        self.concise = concise;
        self
    }

    /// Validate parameters and pick the output mode: summary, then sample, then page
    pub fn mode(&self) -> Result<OutputMode> {
        if self.zone_id.trim().is_empty() {
            return Err(ZoneError::invalid("zone_id must not be empty"));
        }

        let sample_size = self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE);
        if !(1..=MAX_SAMPLE_SIZE).contains(&sample_size) {
            return Err(ZoneError::invalid(format!(
                "sample_size must be between 1 and {MAX_SAMPLE_SIZE}, got {sample_size}"
            )));
        }

        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ZoneError::invalid("page must be 1 or greater"));
        }

        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ZoneError::invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
            )));
        }

        if self.summary {
            Ok(OutputMode::Summary)
        } else if self.sample {
            Ok(OutputMode::Sample {
                size: sample_size as usize,
            })
        } else {
            Ok(OutputMode::Page {
                page,
                per_page,
                sort_by: self.sort_by,
            })
        }
    }
}

/// Sample-mode payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleResponse {
    /// Matching records in the zone
    pub total_in_zone: usize,
    /// Records actually returned
    pub sample_size: usize,
    pub records: Vec<FormattedRecord>,
}

/// Paginated payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResponse {
    pub records: Vec<FormattedRecord>,
    pub pagination: PageMeta,
    /// Shape of the fetched set, attached for larger zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ZoneSummary>,
    /// Set when the fetch stopped at the safety cap
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fetch_capped: bool,
    /// Set when `pagination.total` is a lower bound rather than an exact count
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub total_is_lower_bound: bool,
}

/// Exactly one response form per query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Summary(ZoneSummary),
    Sample(SampleResponse),
    Page(PageResponse),
}

/// Records pulled from the Directory for one query
#[derive(Debug)]
struct Fetched {
    records: Vec<Record>,
    total: usize,
    capped: bool,
    /// `total` counts only the kept records, more may match
    partial_total: bool,
}

/// Runs record queries against a Directory
pub struct QueryEngine<'a> {
    directory: &'a dyn Directory,
    config: EngineConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(directory: &'a dyn Directory, config: EngineConfig) -> Self {
        Self { directory, config }
    }

    /// Execute a query and shape the result
    pub async fn run(&self, query: &RecordQuery) -> Result<ResponseEnvelope> {
        let mode = query.mode()?;
        info!(zone = %query.zone_id, ?mode, "running record query");

        match mode {
            OutputMode::Summary => {
                let fetched = self.fetch(&query.zone_id, &query.filter, None).await?;
                Ok(ResponseEnvelope::Summary(summarize(&fetched.records)))
            }
            OutputMode::Sample { size } => {
                let fetched = self.fetch(&query.zone_id, &query.filter, None).await?;
                let records: Vec<_> = sample(&fetched.records, size)
                    .into_iter()
                    .map(|r| format(r, query.concise))
                    .collect();

                Ok(ResponseEnvelope::Sample(SampleResponse {
                    total_in_zone: fetched.total,
                    sample_size: records.len(),
                    records,
                }))
            }
            OutputMode::Page {
                page,
                per_page,
                sort_by,
            } => {
                let cap = self.config.fetch_cap(page, per_page);
                let mut fetched = self.fetch(&query.zone_id, &query.filter, Some(cap)).await?;

                if let Some(field) = sort_by {
                    fetched.records.sort_by(|a, b| field.compare(a, b));
                }

                let summary = (fetched.total > self.config.summary_threshold)
                    .then(|| summarize(&fetched.records));

                let (slice, mut pagination) = paginate(fetched.records, page, per_page);
                if fetched.capped {
                    pagination = PageMeta::new(fetched.total, page, per_page);
                    pagination.count = slice.len();
                }

                Ok(ResponseEnvelope::Page(PageResponse {
                    records: slice
                        .into_iter()
                        .map(|r| format(r, query.concise))
                        .collect(),
                    pagination,
                    summary,
                    fetch_capped: fetched.capped,
                    total_is_lower_bound: fetched.partial_total,
                }))
            }
        }
    }

    /// Pull every matching record, or stop once `cap` records are collected
    async fn fetch(
        &self,
        zone_id: &str,
        filter: &QueryFilter,
        cap: Option<usize>,
    ) -> Result<Fetched> {
        let per_page = self.config.fetch_page_size.max(1);
        let mut records = Vec::new();
        let mut dropped = 0;
        let mut page = 1;

        loop {
            let batch = self
                .directory
                .list_records(zone_id, filter, page, per_page)
                .await?;
            let has_next = batch.has_next();
            let reported = batch.total_count;
            let received = batch.items.len();

            // The Directory may ignore some criteria; re-check every record.
            let before = records.len();
            records.extend(batch.items.into_iter().filter(|r| filter.matches(r)));
            dropped += received - (records.len() - before);
            debug!(zone = %zone_id, page, received, kept = records.len(), "fetched record page");

            if let Some(cap) = cap {
                if has_next && records.len() >= cap {
                    // The Directory's count is only exact when it applied every criterion.
                    let (total, partial_total) = match reported {
                        Some(reported) if dropped == 0 => (reported.max(records.len()), false),
                        _ => (records.len(), true),
                    };
                    info!(zone = %zone_id, cap, total, dropped, partial_total, "record fetch capped");
                    return Ok(Fetched {
                        records,
                        total,
                        capped: true,
                        partial_total,
                    });
                }
            }

            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(Fetched {
            total: records.len(),
            records,
            capped: false,
            partial_total: false,
        })
    }
}

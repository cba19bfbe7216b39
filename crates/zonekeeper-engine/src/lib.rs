//! Record query shaping and bulk mutation over a [`zonekeeper_core::Directory`].
//!
//! The pieces compose as a pipeline: the [`QueryEngine`] fetches and filters
//! records, then summarizes, samples or paginates them; every emitted record
//! goes through [`format()`]; the [`Toolbox`] serializes the result and bounds
//! it with the [`SizeGuard`]. The [`BulkEngine`] applies batches of creates or
//! updates one at a time and reports each item separately.

#![doc(html_root_url = "https://docs.rs/zonekeeper-engine/0.3.0")]

mod config;
pub mod bulk;
pub mod format;
pub mod paginate;
pub mod query;
pub mod sample;
pub mod size_guard;
pub mod summary;
pub mod tools;

pub use bulk::{BulkEngine, BulkOperation, BulkOutcome, BulkReport, MAX_BATCH};
pub use config::*;
pub use format::{format, to_concise, ConciseRecord, FormattedRecord, TtlView};
pub use paginate::{paginate, PageMeta};
pub use query::{
    OutputMode, PageResponse, QueryEngine, RecordQuery, ResponseEnvelope, SampleResponse,
    SortField,
};
pub use sample::{sample, sample_with};
pub use size_guard::{SizeGuard, DEFAULT_MAX_CHARS, TRUNCATION_NOTICE};
pub use summary::{summarize, ProxiedBreakdown, ZoneSummary};
pub use tools::{Deleted, ToolOutput, Toolbox, ZoneList};

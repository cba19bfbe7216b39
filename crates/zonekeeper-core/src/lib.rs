//! Core types and traits for zonekeeper.
//!
//! This crate provides the foundational types shared by the Directory client and
//! the record engine:
//!
//! - **Types**: records, zones, filters and mutation payloads
//! - **Directory**: the [`Directory`] trait every backend implements
//! - **Errors**: the [`ZoneError`] taxonomy with operator hints
//!
//! # Example
//!
//! ```rust,ignore
//! use zonekeeper_core::{Directory, QueryFilter, RecordType, Result};
//!
//! async fn count_mx(dir: &dyn Directory, zone: &str) -> Result<usize> {
//!     let filter = QueryFilter::new().record_type(RecordType::MX);
//!     let page = dir.list_records(zone, &filter, 1, 100).await?;
//!     Ok(page.items.len())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/zonekeeper-core/0.3.0")]

mod directory;
mod error;
pub mod types;

pub use directory::{Directory, ListPage};
pub use error::{Result, ZoneError};
pub use types::*;

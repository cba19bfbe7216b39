//! # zonekeeper-cli
//!
//! Command-line interface for querying and editing DNS zones.
//!
//! ## Features
//!
//! - **Bounded output**: summaries, random samples and pages instead of dumps
//! - **Safe edits**: local validation, explicit `--confirm` for deletes
//! - **Bulk changes**: ordered batches with per-item results
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;

//! HTTP client for the Directory API.
//!
//! This crate provides the main [`DirectoryClient`], which implements the
//! [`zonekeeper_core::Directory`] trait over the Directory's REST interface, and
//! a lazily-initialized process-wide handle via [`shared`].

#![doc(html_root_url = "https://docs.rs/zonekeeper-client/0.3.0")]

mod client;
mod config;
mod directory;
mod shared;
pub mod api;

pub use client::{DirectoryClient, DirectoryClientBuilder};
pub use config::*;
pub use shared::{shared, try_shared};
pub use zonekeeper_core::{Result, ZoneError};

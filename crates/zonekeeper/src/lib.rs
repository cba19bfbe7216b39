//! Size-bounded querying and safe bulk editing of DNS zones.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zonekeeper::{DirectoryClient, QueryFilter, RecordQuery, RecordType, Toolbox};
//!
//! #[tokio::main]
//! async fn main() -> zonekeeper::Result<()> {
//!     let client = DirectoryClient::new("your-api-token")?;
//!     let tools = Toolbox::new(&client);
//!
//!     // Shape of the zone without pulling every record into the response
//!     let out = tools.query_records(&RecordQuery::new("zone-id").summary()).await;
//!     println!("{}", out.text);
//!
//!     // Second page of MX records, sorted by name
//!     let query = RecordQuery::new("zone-id")
//!         .filter(QueryFilter::new().record_type(RecordType::MX))
//!         .page(2, 20)
//!         .sort_by(zonekeeper::SortField::Name);
//!     println!("{}", tools.query_records(&query).await.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/zonekeeper/0.3.0")]

// Re-export core types
pub use zonekeeper_core::*;

// Re-export client
pub use zonekeeper_client::{
    shared, try_shared, ClientConfig, DirectoryClient, DirectoryClientBuilder, RateLimitConfig,
    DEFAULT_BASE_URL,
};

// Re-export engine
pub use zonekeeper_engine::*;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

//! API endpoint modules.

mod records;
mod zones;

pub use records::{RecordListBuilder, RecordsApi};
pub use zones::{ZoneListBuilder, ZonesApi};

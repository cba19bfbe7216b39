mod filter;
mod mutation;
mod record;
mod zone;

pub use filter::*;
pub use mutation::*;
pub use record::*;
pub use zone::*;

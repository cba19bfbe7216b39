//! Engine tuning knobs.

use crate::size_guard::DEFAULT_MAX_CHARS;

/// Page size used when pulling records from the Directory
pub const DEFAULT_FETCH_PAGE_SIZE: u32 = 100;

/// Paginated fetches stop after this many times the requested window
pub const DEFAULT_FETCH_CAP_FACTOR: usize = 10;

/// Paginated fetches never stop before this many records
pub const DEFAULT_MIN_FETCH_CAP: usize = 1_000;

/// Paginated responses above this total carry a zone summary
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 20;

/// Settings shared by the query engine and the tool surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Response budget in characters
    pub max_response_chars: usize,

    /// Page size for Directory listing calls
    pub fetch_page_size: u32,

    /// Multiplier over `page * per_page` for the fetch cap
    pub fetch_cap_factor: usize,

    /// Lower bound of the fetch cap
    pub min_fetch_cap: usize,

    /// Attach a summary to pages when the total exceeds this
    pub summary_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_response_chars: DEFAULT_MAX_CHARS,
            fetch_page_size: DEFAULT_FETCH_PAGE_SIZE,
            fetch_cap_factor: DEFAULT_FETCH_CAP_FACTOR,
            min_fetch_cap: DEFAULT_MIN_FETCH_CAP,
            summary_threshold: DEFAULT_SUMMARY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Override the response budget
    #[must_use]
    pub const fn max_response_chars(mut self, chars: usize) -> Self {
        self.max_response_chars = chars;
        self
    }

    /// Override the fetch page size
    #[must_use]
    pub const fn fetch_page_size(mut self, size: u32) -> Self {
        self.fetch_page_size = size;
        self
    }

    /// Fetch cap for a paginated request
    #[must_use]
    pub fn fetch_cap(&self, page: u32, per_page: u32) -> usize {
        let window = (page as usize).saturating_mul(per_page as usize);
        window
            .saturating_mul(self.fetch_cap_factor)
            .max(self.min_fetch_cap)
    }
}

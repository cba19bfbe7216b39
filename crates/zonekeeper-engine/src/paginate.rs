//! Page slicing and boundary metadata.

use serde::{Deserialize, Serialize};

/// Page boundary metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Items across all pages
    pub total: usize,
    /// Items on this page
    pub count: usize,
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub per_page: u32,
    /// `page * per_page < total`
    pub has_more: bool,
}

impl PageMeta {
    /// Compute metadata for one page; a page past the end has `count == 0`
    #[must_use]
    pub fn new(total: usize, page: u32, per_page: u32) -> Self {
        let (start, end) = bounds(page, per_page);
        let count = total.min(end).saturating_sub(start);

        Self {
            total,
            count,
            page,
            per_page,
            has_more: end < total,
        }
    }
}

/// Slice `items` to `[(page-1)*per_page, page*per_page)`
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> (Vec<T>, PageMeta) {
    let meta = PageMeta::new(items.len(), page, per_page);
    let (start, _) = bounds(page, per_page);

    let slice = items.into_iter().skip(start).take(meta.count).collect();
    (slice, meta)
}

fn bounds(page: u32, per_page: u32) -> (usize, usize) {
    let per_page = per_page as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
    let end = (page as usize).saturating_mul(per_page);
    (start, end)
}

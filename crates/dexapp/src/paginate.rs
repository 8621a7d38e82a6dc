//! # Paginator
//!
//! Fixed-size page slices over a filtered list. Pure and deterministic.
//!
//! - `total_count` is the list length.
//! - `total_pages` is `ceil(total_count / page_size)`, so it is 0 exactly
//!   when the list is empty.
//! - Out-of-range windows (page past the end, page 0, page size 0) yield an
//!   empty slice. They are never an error.

use crate::model::CatalogEntry;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<CatalogEntry>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Page {
    /// True when entries exist past this window.
    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Cuts page `page` (1-based) of size `page_size` out of `list`.
pub fn slice(list: &[CatalogEntry], page: usize, page_size: usize) -> Page {
    let total_count = list.len();

    let items = match page.checked_sub(1) {
        Some(zero_based) if page_size > 0 => {
            let start = zero_based.saturating_mul(page_size);
            if start >= total_count {
                Vec::new()
            } else {
                let end = start.saturating_add(page_size).min(total_count);
                list[start..end].to_vec()
            }
        }
        _ => Vec::new(),
    };

    Page {
        items,
        page,
        page_size,
        total_count,
        total_pages: total_pages(total_count, page_size),
    }
}

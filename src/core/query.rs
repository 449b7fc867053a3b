//! Pagination utilities
//!
//! Listings are filtered in process and then cut into pages here, so every
//! storage backend pages the same way.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// `page` / `limit` query parameters
///
/// Each listing's query struct carries its own `page` and `limit` fields and
/// converts to this type; query strings are not flattened.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Page number, at least 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Limit, between 1 and [`MAX_LIMIT`]
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Cut one page out of the full, already filtered and sorted list
    pub fn paginate<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let page = self.page();
        let limit = self.limit();
        let total = items.len();

        let data = items
            .into_iter()
            .skip(page_start(page, limit))
            .take(limit)
            .collect();

        PaginatedResponse {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Offset of the first item on `page`; saturates for absurd page numbers
fn page_start(page: usize, limit: usize) -> usize {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The page of data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Transform the items of the page, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = page_start(page, limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

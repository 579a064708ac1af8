//! Filter and paging types for storage queries

use serde::{Deserialize, Serialize};

/// Filter for stored queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryFilter {
    /// Only queries in this domain
    pub domain: Option<String>,

    /// Only queries by this user
    pub user_id: Option<String>,
}

/// One-based page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: usize = 50;
    pub const MAX_PER_PAGE: usize = 100;
    pub const MAX_PAGE: usize = 1_000_000;

    /// Clamp to `1 <= page <= MAX_PAGE` and `1 <= per_page <= MAX_PER_PAGE`.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.clamp(1, Self::MAX_PAGE),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

/// A page of results with the overall total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

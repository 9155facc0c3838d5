//! Pagination helpers for list endpoints
//!
//! List endpoints take `page`/`limit` query params and wrap their items in
//! [`Paginated`], mirroring the response shape clients already consume.

use serde::{Deserialize, Serialize};

const MAX_LIMIT: u32 = 100;

/// Query params for paginated listings
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    /// Page clamped to >= 1, limit clamped to 1..=100
    pub fn normalized(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.clamp(1, MAX_LIMIT))
    }

    /// Offset into the result set for the normalized page
    pub fn offset(&self) -> u32 {
        let (page, limit) = self.normalized();
        (page - 1) * limit
    }
}

/// Paginated response payload
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, query: &PageQuery, total: u64) -> Self {
        let (page, limit) = query.normalized();
        let total_pages = total.div_ceil(limit as u64);
        Self {
            items,
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_clamps_bounds() {
        let q = PageQuery { page: 0, limit: 0 };
        assert_eq!(q.normalized(), (1, 1));
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            page: 3,
            limit: 1000,
        };
        assert_eq!(q.normalized(), (3, 100));
        assert_eq!(q.offset(), 200);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let q = PageQuery { page: 1, limit: 10 };
        let p = Paginated::new(vec![1, 2, 3], &q, 21);
        assert_eq!(p.total_pages, 3);
    }
}

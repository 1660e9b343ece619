//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageQuery {
    /// Create a new page query, floored at page 1
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.max(1) - 1) * self.per_page
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Offset as i64 for SQL binds
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Limit as i64 for SQL binds
    pub fn limit_i64(&self) -> i64 {
        self.limit() as i64
    }
}

/// Pagination block included in list envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-indexed)
    pub current_page: u32,

    /// Next page, clamped so it never exceeds the total row count
    pub next_page: Option<u32>,

    /// Previous page, absent on the first page
    pub prev_page: Option<u32>,

    /// Items per page
    pub per_page: u32,

    /// Total number of matching rows
    pub total: u64,
}

impl PageMeta {
    /// Build metadata for a page of a `total`-row result set
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let current_page = page.max(1);
        let next_page = current_page + 1;
        Self {
            current_page,
            next_page: Some((next_page as u64).min(total) as u32),
            prev_page: if current_page <= 1 {
                None
            } else {
                Some(current_page - 1)
            },
            per_page,
            total,
        }
    }

    /// Metadata for a single-shot search result (no paging links)
    pub fn single(total: u64) -> Self {
        Self {
            current_page: 1,
            next_page: None,
            prev_page: None,
            per_page: total as u32,
            total,
        }
    }
}

// Constants
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 12;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_offset() {
        let q = PageQuery::new(1, 12);
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), 12);

        let q = PageQuery::new(3, 12);
        assert_eq!(q.offset(), 24);
    }

    #[test]
    fn test_page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 12);
    }

    #[test]
    fn test_next_page_clamped_to_total() {
        // 40 rows, page 2: next is 3
        let meta = PageMeta::new(2, 12, 40);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));

        // 2 rows, page 2: next would be 3 but clamps to total
        let meta = PageMeta::new(2, 12, 2);
        assert_eq!(meta.next_page, Some(2));
    }

    #[test]
    fn test_next_page_never_exceeds_empty_total() {
        let meta = PageMeta::new(1, 12, 0);
        assert_eq!(meta.next_page, Some(0));
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.total, 0);
    }

    #[test]
    fn test_prev_page_absent_on_first_page() {
        let meta = PageMeta::new(1, 12, 100);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, Some(2));
    }

    #[test]
    fn test_page_floor() {
        let meta = PageMeta::new(0, 12, 100);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn test_single_shot_meta() {
        let meta = PageMeta::single(7);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.per_page, 7);
        assert_eq!(meta.total, 7);
    }
}

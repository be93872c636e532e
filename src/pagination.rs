use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Clamp raw query values: page at least 1, per_page within `1..=100`.
    pub fn clamped(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Page metadata returned next to paginated API data.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn new(pagination: Pagination, total: usize) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.per_page,
            total,
            total_pages: total.div_ceil(pagination.per_page.max(1)),
        }
    }
}

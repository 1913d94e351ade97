/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl PaginationParams {
    /// Normalise raw query values: page ≥ 1, limit within 1..=100.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Paginated result wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: PaginationParams) -> Self {
        let total_pages = total.div_ceil(u64::from(params.limit)) as u32;
        Self {
            items,
            total,
            page: params.page,
            limit: params.limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

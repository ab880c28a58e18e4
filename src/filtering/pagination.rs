pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 50;

/// Largest offset a SQL backend accepts (`OFFSET` is a signed 64-bit integer).
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();
/// Largest page whose offset stays within [`MAX_OFFSET`] at any allowed limit.
pub const MAX_PAGE: u64 = MAX_OFFSET / MAX_LIMIT + 1;

/// Validated page-number pagination input (1-based `page`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// The `limit`/`offset` slice this page selects: `offset = (page - 1) * limit`,
    /// capped at [`MAX_OFFSET`].
    #[must_use]
    pub fn window(self) -> PageWindow {
        PageWindow {
            limit: self.limit,
            offset: self
                .page
                .saturating_sub(1)
                .saturating_mul(self.limit)
                .min(MAX_OFFSET),
        }
    }
}

/// Slice of ordered results handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Pagination::default().window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_starts_at_zero() {
        assert_eq!(
            Pagination::new(1, 10).window(),
            PageWindow { limit: 10, offset: 0 }
        );
    }

    #[test]
    fn test_third_page_of_twenty() {
        assert_eq!(
            Pagination::new(3, 20).window(),
            PageWindow { limit: 20, offset: 40 }
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PageWindow::default(), PageWindow { limit: 10, offset: 0 });
    }

    #[test]
    fn test_huge_page_offset_is_capped() {
        let window = Pagination::new(u64::MAX, MAX_LIMIT).window();
        assert_eq!(window.offset, MAX_OFFSET);
        assert!(i64::try_from(window.offset).is_ok());
        assert_eq!(window.limit, MAX_LIMIT);
    }

    #[test]
    fn test_max_page_fits_at_max_limit() {
        let window = Pagination::new(MAX_PAGE, MAX_LIMIT).window();
        assert_eq!(window.offset, (MAX_PAGE - 1) * MAX_LIMIT);
        assert!(window.offset <= MAX_OFFSET);
        assert!(MAX_PAGE * MAX_LIMIT > MAX_OFFSET);
    }

    #[test]
    fn test_page_zero_is_treated_as_first() {
        assert_eq!(Pagination::new(0, 5).window().offset, 0);
    }
}

//! Page/per-page query handling

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    /// Fill in defaults; pages start at 1 and sizes are capped
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_caps() {
        let page = Page::new(None, None);
        assert_eq!(page, Page { page: 1, per_page: DEFAULT_PAGE_SIZE });
        assert_eq!(page.offset(), 0);

        let page = Page::new(Some(0), Some(10_000));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset() {
        let page = Page::new(Some(3), Some(25));
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn test_huge_page_offset_stays_exact() {
        let page = Page::new(Some(50_000_000), Some(100));
        assert_eq!(page.offset(), 4_999_999_900);

        let page = Page::new(Some(u32::MAX), Some(u32::MAX));
        assert_eq!(page.offset(), i64::from(u32::MAX - 1) * i64::from(MAX_PAGE_SIZE));
    }
}

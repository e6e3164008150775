//! Page-based listing parameters and results.

use serde::Serialize;

use super::ValidationError;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page < 1 {
            return Err(ValidationError::out_of_range("page", 1, i64::from(u32::MAX), 0));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ValidationError::out_of_range(
                "per_page",
                1,
                MAX_PER_PAGE as i64,
                per_page as i64,
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let per_page = request.per_page() as u64;
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
            total_pages: total.div_ceil(per_page),
        }
    }

    /// Slices an already-filtered, already-sorted collection.
    pub fn from_vec(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.per_page() as usize)
            .collect();
        Self::new(items, request, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twenty() {
        let req = PageRequest::new(None, None).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.per_page(), 20);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn rejects_zero_page_and_oversized_pages() {
        assert!(PageRequest::new(Some(0), None).is_err());
        assert!(PageRequest::new(None, Some(0)).is_err());
        assert!(PageRequest::new(None, Some(101)).is_err());
    }

    #[test]
    fn offset_accounts_for_page_size() {
        let req = PageRequest::new(Some(3), Some(10)).unwrap();
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn from_vec_slices_and_counts_pages() {
        let req = PageRequest::new(Some(2), Some(2)).unwrap();
        let page = Page::from_vec(vec![1, 2, 3, 4, 5], &req);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
    }
}

//! Offset pagination shared by list endpoints.

use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// A 1-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Missing or zero values fall back to page 1 and the default size.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let per_page = per_page
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    pub fn pagination(&self) -> Pagination {
        let per_page = u64::from(self.request.per_page());
        let pages = self.total.div_ceil(per_page).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        let page = self.request.page();
        let is_next = page < total_pages;
        Pagination {
            count: self.total,
            total_pages,
            is_next,
            is_prev: page > 1,
            next_page: is_next.then(|| page + 1),
        }
    }
}

/// Pagination block returned next to list data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub count: u64,
    pub total_pages: u32,
    pub is_next: bool,
    pub is_prev: bool,
    pub next_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults_and_bounds() {
        let req = PageRequest::new(None, None);
        assert_eq!((req.page(), req.per_page()), (1, DEFAULT_PER_PAGE));

        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!((req.page(), req.per_page()), (1, DEFAULT_PER_PAGE));

        let req = PageRequest::new(Some(3), Some(500));
        assert_eq!(req.per_page(), MAX_PER_PAGE);
        assert_eq!(req.offset(), 200);
    }

    #[test]
    fn pagination_in_the_middle() {
        let page: Page<()> = Page::new(vec![], 25, PageRequest::new(Some(2), Some(10)));
        assert_eq!(
            page.pagination(),
            Pagination {
                count: 25,
                total_pages: 3,
                is_next: true,
                is_prev: true,
                next_page: Some(3),
            }
        );
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page: Page<()> = Page::new(vec![], 0, PageRequest::default());
        let pagination = page.pagination();
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.is_next);
        assert!(!pagination.is_prev);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let page: Page<()> = Page::new(vec![], 11, PageRequest::default());
        let json = serde_json::to_value(page.pagination()).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["isNext"], true);
        assert_eq!(json["nextPage"], 2);
    }
}

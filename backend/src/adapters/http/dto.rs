//! Request and response types shared across resources.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Page, PageRequest, ReviewStatus, ValidationError};

/// `?page=&per_page=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn to_request(self) -> Result<PageRequest, ValidationError> {
        PageRequest::new(self.page, self.per_page)
    }
}

/// `?status=&page=&per_page=` for admin review queues.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReviewQueueParams {
    pub status: Option<ReviewStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ReviewQueueParams {
    pub fn to_request(self) -> Result<PageRequest, ValidationError> {
        PageRequest::new(self.page, self.per_page)
    }
}

/// Body of every admin "reject" action.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Page of response DTOs.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let page = page.map(f);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}

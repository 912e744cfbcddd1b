use serde::{Deserialize, Serialize};

use super::Article;

/// Pagination cursor returned with a browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
}

impl Page {
    /// Cursor for a response that carried no pagination block.
    pub fn single(count: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_count: count as u64,
            has_next: false,
        }
    }

    /// Page to request next. `None` once `has_next` is false or the page
    /// number cannot advance.
    pub fn next_page(&self) -> Option<u32> {
        self.current_page.checked_add(1).filter(|_| self.has_next)
    }

    /// `has_next` is authoritative; this only reports whether the backend
    /// agrees with its own page counts.
    pub fn is_consistent(&self) -> bool {
        self.has_next == (self.current_page < self.total_pages)
    }
}

/// One page of the browse listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub articles: Vec<Article>,
    pub page: Page,
}

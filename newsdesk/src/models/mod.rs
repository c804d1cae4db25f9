//! Domain entities, request payloads and paged list results

mod blog;
mod news;

pub use blog::{Blog, BlogList, BlogPayload};
pub use news::{News, NewsList, NewsPayload};

use serde::{Deserialize, Serialize};

use crate::pagination::{has_more, total_pages, PaginationQuery};

/// Paging metadata shared by every list result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Rows matching the filter, ignoring pagination
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u32,
    pub size: u32,
    pub has_more: bool,
}

impl ListMeta {
    /// Compute the metadata for `total` matching rows under `query`
    #[must_use]
    pub fn new(total_count: u64, query: &PaginationQuery) -> Self {
        Self {
            total_count,
            total_pages: total_pages(total_count, query.size()),
            page: query.page(),
            size: query.size(),
            has_more: has_more(query.page(), total_count, query.size()),
        }
    }
}

/// One page of entities plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub meta: ListMeta,
    pub items: Vec<T>,
}

impl<T> Paged<T> {
    /// An empty page for a filter that matched nothing
    #[must_use]
    pub fn empty(query: &PaginationQuery) -> Self {
        Self {
            meta: ListMeta::new(0, query),
            items: Vec::new(),
        }
    }
}

//! Repository capability traits
//!
//! One trait per resource. Handlers and usecases hold them as
//! `Arc<dyn BlogRepository>` / `Arc<dyn NewsRepository>`, so the traits use
//! `async_trait` to stay object safe.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::models::{Blog, BlogPayload, News, NewsPayload, Paged};
use crate::pagination::PaginationQuery;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage for blog posts
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new blog under a freshly generated identifier
    async fn create(&self, blog: &BlogPayload) -> RepositoryResult<Blog>;

    /// Replace the title of an existing blog
    ///
    /// Fails with `NotFound` when no blog has this identifier.
    async fn update(&self, id: Uuid, blog: &BlogPayload) -> RepositoryResult<Blog>;

    /// Remove a blog; zero affected rows is `NotFound`
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Blog>;

    /// One page of blogs ordered by creation time, optionally filtered by a
    /// case-sensitive title substring
    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<Blog>>;
}

/// Storage for news items
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a new news item under a freshly generated identifier
    async fn create(&self, news: &NewsPayload) -> RepositoryResult<News>;

    /// Replace the mutable fields of an existing news item
    async fn update(&self, id: Uuid, news: &NewsPayload) -> RepositoryResult<News>;

    /// Remove a news item for good; zero affected rows is `NotFound`
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Mark a news item deleted without removing the row
    ///
    /// Repeating the call keeps the first deletion timestamp.
    async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Fetch a news item by identifier, soft-deleted or not
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<News>;

    /// One page of live (not soft-deleted) news ordered by creation time
    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<News>>;
}

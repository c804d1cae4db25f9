use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Blog, BlogPayload, News, NewsPayload, Paged};
use crate::pagination::PaginationQuery;
use crate::repository::{BlogRepository, NewsRepository, RepositoryResult};

/// Blog operations exposed to the HTTP layer
#[async_trait]
pub trait BlogUsecase: Send + Sync {
    async fn create(&self, blog: &BlogPayload) -> RepositoryResult<Blog>;
    async fn update(&self, id: Uuid, blog: &BlogPayload) -> RepositoryResult<Blog>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Blog>;
    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<Blog>>;

    /// Create a news item from the blog surface (`POST /blogs/news`)
    async fn create_news(&self, news: &NewsPayload) -> RepositoryResult<News>;
}

/// Default [`BlogUsecase`] backed by a blog and a news repository
#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    news: Arc<dyn NewsRepository>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, news: Arc<dyn NewsRepository>) -> Self {
        Self { blogs, news }
    }
}

#[async_trait]
impl BlogUsecase for BlogService {
    async fn create(&self, blog: &BlogPayload) -> RepositoryResult<Blog> {
        self.blogs.create(blog).await
    }

    async fn update(&self, id: Uuid, blog: &BlogPayload) -> RepositoryResult<Blog> {
        self.blogs.update(id, blog).await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.blogs.delete(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Blog> {
        self.blogs.get_by_id(id).await
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<Blog>> {
        self.blogs.get_all(title, query).await
    }

    async fn create_news(&self, news: &NewsPayload) -> RepositoryResult<News> {
        self.news.create(news).await
    }
}

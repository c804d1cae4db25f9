use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{News, NewsPayload, Paged};
use crate::pagination::PaginationQuery;
use crate::repository::{NewsRepository, RepositoryResult};

/// News operations exposed to the HTTP layer
#[async_trait]
pub trait NewsUsecase: Send + Sync {
    async fn create(&self, news: &NewsPayload) -> RepositoryResult<News>;
    async fn update(&self, id: Uuid, news: &NewsPayload) -> RepositoryResult<News>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
    async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()>;
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<News>;
    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<News>>;
}

/// Default [`NewsUsecase`] backed by a news repository
#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(news: Arc<dyn NewsRepository>) -> Self {
        Self { news }
    }
}

#[async_trait]
impl NewsUsecase for NewsService {
    async fn create(&self, news: &NewsPayload) -> RepositoryResult<News> {
        self.news.create(news).await
    }

    async fn update(&self, id: Uuid, news: &NewsPayload) -> RepositoryResult<News> {
        self.news.update(id, news).await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.news.delete(id).await
    }

    async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.news.soft_delete(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<News> {
        self.news.get_by_id(id).await
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<News>> {
        self.news.get_all(title, query).await
    }
}

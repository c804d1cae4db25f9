//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    repository::{PgBlogRepository, PgNewsRepository},
    usecase::{BlogService, BlogUsecase, NewsService, NewsUsecase},
};

/// Dependencies handed to the router
///
/// Built once at startup and cloned per request; every field is behind an
/// `Arc` (or is a pool handle), so clones are shallow.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    blogs: Arc<dyn BlogUsecase>,
    news: Arc<dyn NewsUsecase>,
    db_pool: Option<PgPool>,
}

impl AppState {
    /// Create state from already-built usecases, without a database pool
    pub fn new(config: Config, blogs: Arc<dyn BlogUsecase>, news: Arc<dyn NewsUsecase>) -> Self {
        Self {
            config: Arc::new(config),
            blogs,
            news,
            db_pool: None,
        }
    }

    /// Wire the PostgreSQL repositories and default usecases onto `pool`
    pub fn from_pool(config: Config, pool: PgPool) -> Self {
        let blog_repo = Arc::new(PgBlogRepository::new(pool.clone()));
        let news_repo = Arc::new(PgNewsRepository::new(pool.clone()));

        let blogs = Arc::new(BlogService::new(blog_repo, news_repo.clone()));
        let news = Arc::new(NewsService::new(news_repo));

        Self::new(config, blogs, news).with_pool(pool)
    }

    /// Attach a pool for readiness checks
    #[must_use]
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn blogs(&self) -> &dyn BlogUsecase {
        self.blogs.as_ref()
    }

    pub fn news(&self) -> &dyn NewsUsecase {
        self.news.as_ref()
    }

    pub fn db(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }
}

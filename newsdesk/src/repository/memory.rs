//! In-memory repositories for usecase and handler tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::listing::{paginate, VecSource};
use super::traits::{BlogRepository, NewsRepository, RepositoryResult};
use crate::models::{Blog, BlogPayload, News, NewsPayload, Paged};
use crate::pagination::PaginationQuery;

fn matches_title(title: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |needle| title.contains(needle))
}

#[derive(Default)]
pub struct MemoryBlogRepository {
    rows: Mutex<Vec<Blog>>,
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn create(&self, blog: &BlogPayload) -> RepositoryResult<Blog> {
        let row = Blog {
            id: Uuid::new_v4(),
            title: blog.title.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, blog: &BlogPayload) -> RepositoryResult<Blog> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Update, "Blog", id.to_string()))?;
        row.title = blog.title.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        if rows.len() == before {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, "Blog", id.to_string()));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Blog> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::FindById, "Blog", id.to_string()))
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<Blog>> {
        let rows: Vec<Blog> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| matches_title(&b.title, title))
            .cloned()
            .collect();
        paginate(&mut VecSource::new(rows), query).await
    }
}

#[derive(Default)]
pub struct MemoryNewsRepository {
    rows: Mutex<Vec<News>>,
}

impl MemoryNewsRepository {
    fn with_row<T>(
        &self,
        id: Uuid,
        operation: RepositoryOperation,
        f: impl FnOnce(&mut News) -> T,
    ) -> RepositoryResult<T> {
        let mut rows = self.rows.lock().unwrap();
        rows.iter_mut()
            .find(|n| n.id == id)
            .map(f)
            .ok_or_else(|| RepositoryError::not_found(operation, "News", id.to_string()))
    }
}

#[async_trait]
impl NewsRepository for MemoryNewsRepository {
    async fn create(&self, news: &NewsPayload) -> RepositoryResult<News> {
        let row = News {
            id: Uuid::new_v4(),
            title: news.title.clone(),
            description: news.description.clone(),
            photo: news.photo,
            published_by: news.published_by,
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, news: &NewsPayload) -> RepositoryResult<News> {
        self.with_row(id, RepositoryOperation::Update, |row| {
            row.title = news.title.clone();
            row.description = news.description.clone();
            row.photo = news.photo;
            row.published_by = news.published_by;
            row.clone()
        })
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| n.id != id);
        if rows.len() == before {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, "News", id.to_string()));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.with_row(id, RepositoryOperation::SoftDelete, |row| {
            row.deleted_at.get_or_insert_with(Utc::now);
        })
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<News> {
        self.with_row(id, RepositoryOperation::FindById, |row| row.clone())
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<News>> {
        let rows: Vec<News> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| !n.is_deleted() && matches_title(&n.title, title))
            .cloned()
            .collect();
        paginate(&mut VecSource::new(rows), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(title: &str) -> NewsPayload {
        NewsPayload {
            title: title.to_string(),
            description: None,
            photo: None,
            published_by: None,
        }
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_first_timestamp() {
        let repo = MemoryNewsRepository::default();
        let created = repo.create(&news("Launch")).await.unwrap();

        repo.soft_delete(created.id).await.unwrap();
        let first = repo.get_by_id(created.id).await.unwrap().deleted_at;
        repo.soft_delete(created.id).await.unwrap();
        let second = repo.get_by_id(created.id).await.unwrap().deleted_at;

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_title_filter_is_case_sensitive_substring() {
        let repo = MemoryBlogRepository::default();
        for title in ["Rust news", "rusty nails", "Go weekly"] {
            repo.create(&BlogPayload { title: title.to_string() }).await.unwrap();
        }

        let page = repo
            .get_all(Some("Rust"), &PaginationQuery::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.items[0].title, "Rust news");
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::listing::{paginate, ListStatements, SqlPage};
use super::snapshot::begin_snapshot;
use super::traits::{BlogRepository, RepositoryResult};
use crate::models::{Blog, BlogPayload, Paged};
use crate::pagination::PaginationQuery;

const ENTITY: &str = "Blog";

static LIST: ListStatements = ListStatements {
    count: r#"
        SELECT COUNT(*) FROM blogs
        WHERE ($1::text IS NULL OR title LIKE $1)
    "#,
    fetch: r#"
        SELECT id, title, created_at FROM blogs
        WHERE ($1::text IS NULL OR title LIKE $1)
        ORDER BY created_at, id
        OFFSET $2 LIMIT $3
    "#,
};

/// PostgreSQL-backed blog storage
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn create(&self, blog: &BlogPayload) -> RepositoryResult<Blog> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (id, title)
            VALUES ($1, $2)
            RETURNING id, title, created_at
            "#,
        )
        .bind(id)
        .bind(&blog.title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Create, e))
    }

    async fn update(&self, id: Uuid, blog: &BlogPayload) -> RepositoryResult<Blog> {
        sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs SET title = $1
            WHERE id = $2
            RETURNING id, title, created_at
            "#,
        )
        .bind(&blog.title)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Update, e)
                .with_entity(ENTITY, id.to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Delete, e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                RepositoryOperation::Delete,
                ENTITY,
                id.to_string(),
            ));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Blog> {
        sqlx::query_as::<_, Blog>("SELECT id, title, created_at FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindById, e))?
            .ok_or_else(|| {
                RepositoryError::not_found(RepositoryOperation::FindById, ENTITY, id.to_string())
            })
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<Blog>> {
        let mut tx = begin_snapshot(&self.pool).await?;
        let page = paginate(&mut SqlPage::<Blog>::new(&mut *tx, &LIST, title), query).await?;
        tx.commit()
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryErrorKind;

    fn payload(title: &str) -> BlogPayload {
        BlogPayload {
            title: title.to_string(),
        }
    }

    async fn seed(repo: &PgBlogRepository, titles: &[&str]) {
        for title in titles {
            repo.create(&payload(title)).await.unwrap();
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_create_and_get_by_id(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        let created = repo.create(&payload("First post")).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.title, "First post");
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_get_missing_is_not_found(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::FindById);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_update_replaces_title(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        let created = repo.create(&payload("Draft")).await.unwrap();

        let updated = repo.update(created.id, &payload("Final")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_update_missing_is_not_found(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        let id = Uuid::new_v4();

        let err = repo.update(id, &payload("Renamed")).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::Update);
        assert_eq!(err.entity_id, Some(id.to_string()));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_delete_removes_row_once(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        let created = repo.create(&payload("Short lived")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.get_by_id(created.id).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);

        let err = repo.delete(created.id).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::Delete);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_get_all_filters_and_pages(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        seed(&repo, &["Rust one", "Rust two", "Rust three", "Go one", "rusty"]).await;

        let page = repo
            .get_all(Some("Rust"), &PaginationQuery::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.meta.total_count, 3);
        assert_eq!(page.meta.total_pages, 2);
        assert!(!page.meta.has_more);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Rust three");

        let all = repo.get_all(None, &PaginationQuery::new(1, 10)).await.unwrap();
        assert_eq!(all.meta.total_count, 5);
        let titles: Vec<_> = all.items.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust one", "Rust two", "Rust three", "Go one", "rusty"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_get_all_treats_wildcards_literally(pool: PgPool) {
        let repo = PgBlogRepository::new(pool);
        seed(&repo, &["50% off", "500 off", "snake_case", "snakeXcase", r"back\slash"]).await;
        let query = PaginationQuery::new(1, 10);

        let page = repo.get_all(Some("50%"), &query).await.unwrap();
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.items[0].title, "50% off");

        let page = repo.get_all(Some("e_c"), &query).await.unwrap();
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.items[0].title, "snake_case");

        let page = repo.get_all(Some(r"k\s"), &query).await.unwrap();
        assert_eq!(page.meta.total_count, 1);

        let page = repo.get_all(Some("' OR 1=1 --"), &query).await.unwrap();
        assert_eq!(page.meta.total_count, 0);
        assert!(page.items.is_empty());
    }
}

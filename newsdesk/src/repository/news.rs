use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::listing::{paginate, ListStatements, SqlPage};
use super::snapshot::begin_snapshot;
use super::traits::{NewsRepository, RepositoryResult};
use crate::models::{News, NewsPayload, Paged};
use crate::pagination::PaginationQuery;

const ENTITY: &str = "News";

static LIST: ListStatements = ListStatements {
    count: r#"
        SELECT COUNT(*) FROM news
        WHERE deleted_at IS NULL
          AND ($1::text IS NULL OR title LIKE $1)
    "#,
    fetch: r#"
        SELECT id, title, description, photo, published_by, created_at, deleted_at
        FROM news
        WHERE deleted_at IS NULL
          AND ($1::text IS NULL OR title LIKE $1)
        ORDER BY created_at, id
        OFFSET $2 LIMIT $3
    "#,
};

/// PostgreSQL-backed news storage
#[derive(Clone)]
pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn execute_by_id(
        &self,
        sql: &str,
        id: Uuid,
        operation: RepositoryOperation,
    ) -> RepositoryResult<()> {
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(operation, e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(operation, ENTITY, id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn create(&self, news: &NewsPayload) -> RepositoryResult<News> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, News>(
            r#"
            INSERT INTO news (id, title, description, photo, published_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, photo, published_by, created_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(&news.title)
        .bind(&news.description)
        .bind(news.photo)
        .bind(news.published_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Create, e))
    }

    async fn update(&self, id: Uuid, news: &NewsPayload) -> RepositoryResult<News> {
        sqlx::query_as::<_, News>(
            r#"
            UPDATE news
            SET title = $1, description = $2, photo = $3, published_by = $4
            WHERE id = $5
            RETURNING id, title, description, photo, published_by, created_at, deleted_at
            "#,
        )
        .bind(&news.title)
        .bind(&news.description)
        .bind(news.photo)
        .bind(news.published_by)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Update, e)
                .with_entity(ENTITY, id.to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.execute_by_id("DELETE FROM news WHERE id = $1", id, RepositoryOperation::Delete)
            .await
    }

    async fn soft_delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.execute_by_id(
            "UPDATE news SET deleted_at = COALESCE(deleted_at, now()) WHERE id = $1",
            id,
            RepositoryOperation::SoftDelete,
        )
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<News> {
        sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, description, photo, published_by, created_at, deleted_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindById, e))?
        .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::FindById, ENTITY, id.to_string()))
    }

    async fn get_all(
        &self,
        title: Option<&str>,
        query: &PaginationQuery,
    ) -> RepositoryResult<Paged<News>> {
        let mut tx = begin_snapshot(&self.pool).await?;
        let page = paginate(&mut SqlPage::<News>::new(&mut *tx, &LIST, title), query).await?;
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

    fn payload(title: &str) -> NewsPayload {
        NewsPayload {
            title: title.to_string(),
            description: Some("d".into()),
            photo: Some(Uuid::new_v4()),
            published_by: Some(Uuid::new_v4()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_create_persists_optional_fields(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let input = payload("Launch");

        let created = repo.create(&input).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.title, "Launch");
        assert_eq!(created.description, input.description);
        assert_eq!(created.photo, input.photo);
        assert_eq!(created.published_by, input.published_by);
        assert!(created.deleted_at.is_none());
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);

        let bare = repo
            .create(&NewsPayload {
                title: "Bare".into(),
                description: None,
                photo: None,
                published_by: None,
            })
            .await
            .unwrap();
        assert!(bare.description.is_none());
        assert!(bare.photo.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_update_replaces_mutable_fields(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let created = repo.create(&payload("Draft")).await.unwrap();

        let mut changes = payload("Final");
        changes.description = None;
        let updated = repo.update(created.id, &changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Final");
        assert!(updated.description.is_none());
        assert_eq!(updated.photo, changes.photo);
        assert_eq!(updated.published_by, changes.published_by);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_update_missing_is_not_found(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let err = repo.update(Uuid::new_v4(), &payload("Ghost")).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::Update);
        assert_eq!(err.entity_type.as_deref(), Some(ENTITY));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_delete_removes_row_once(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
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
    async fn test_soft_delete_hides_from_listing_only(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let kept = repo.create(&payload("Kept")).await.unwrap();
        let gone = repo.create(&payload("Gone")).await.unwrap();

        repo.soft_delete(gone.id).await.unwrap();

        let page = repo.get_all(None, &PaginationQuery::new(1, 10)).await.unwrap();
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, kept.id);

        let fetched = repo.get_by_id(gone.id).await.unwrap();
        assert!(fetched.is_deleted());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_soft_delete_keeps_first_timestamp(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let created = repo.create(&payload("Launch")).await.unwrap();

        repo.soft_delete(created.id).await.unwrap();
        let first = repo.get_by_id(created.id).await.unwrap().deleted_at;
        repo.soft_delete(created.id).await.unwrap();
        let second = repo.get_by_id(created.id).await.unwrap().deleted_at;

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_soft_delete_missing_is_not_found(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let err = repo.soft_delete(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::SoftDelete);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_get_all_filters_pages_and_skips_deleted(pool: PgPool) {
        let repo = PgNewsRepository::new(pool);
        let mut ids = Vec::new();
        for title in ["Item_1", "Item_2", "Item_3", "Item_4", "ItemX5", "Other"] {
            ids.push(repo.create(&payload(title)).await.unwrap().id);
        }
        repo.soft_delete(ids[1]).await.unwrap();

        let page = repo
            .get_all(Some("Item_"), &PaginationQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.meta.total_count, 3);
        assert_eq!(page.meta.total_pages, 2);
        assert!(page.meta.has_more);
        let titles: Vec<_> = page.items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Item_1", "Item_3"]);

        let empty = repo
            .get_all(Some("Missing"), &PaginationQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(empty.meta.total_count, 0);
        assert_eq!(empty.meta.total_pages, 0);
        assert!(empty.items.is_empty());
    }
}

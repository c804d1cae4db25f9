//! Count-then-fetch listing shared by every repository
//!
//! A listing first counts the rows matching the filter and only fetches the
//! requested page when that count is non-zero.

use std::future::Future;
use std::marker::PhantomData;

use sqlx::{postgres::PgRow, FromRow, PgConnection};

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::RepositoryResult;
use crate::models::{ListMeta, Paged};
use crate::pagination::PaginationQuery;

/// A filtered row set that can be counted and read page by page
pub trait PageSource {
    type Item;

    /// Number of rows matching the filter
    fn count(&mut self) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Rows `offset..offset + limit` in listing order
    fn fetch(
        &mut self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Item>>> + Send;
}

/// Read one page from `source`, skipping the fetch when nothing matches
pub async fn paginate<S>(source: &mut S, query: &PaginationQuery) -> RepositoryResult<Paged<S::Item>>
where
    S: PageSource + Send,
{
    let total = source.count().await?;
    if total == 0 {
        tracing::debug!(page = query.page(), size = query.size(), "No rows match, skipping page fetch");
        return Ok(Paged::empty(query));
    }

    let items = source.fetch(query.offset(), query.limit()).await?;
    Ok(Paged {
        meta: ListMeta::new(total, query),
        items,
    })
}

/// Build a `LIKE` pattern matching `needle` anywhere in the column
///
/// `%`, `_` and `\` in the needle are escaped so they match literally
/// (PostgreSQL's default `LIKE` escape character is the backslash).
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Count and page statements for one table
///
/// Both statements take the optional `LIKE` pattern as `$1`; the page
/// statement also takes the offset as `$2` and the limit as `$3`.
pub struct ListStatements {
    pub count: &'static str,
    pub fetch: &'static str,
}

/// A page source running [`ListStatements`] on a single connection
///
/// Repositories hand it a connection borrowed from an open transaction so
/// the count and the fetch read the same snapshot.
pub struct SqlPage<'c, T> {
    conn: &'c mut PgConnection,
    statements: &'static ListStatements,
    pattern: Option<String>,
    _row: PhantomData<fn() -> T>,
}

impl<'c, T> SqlPage<'c, T> {
    pub fn new(
        conn: &'c mut PgConnection,
        statements: &'static ListStatements,
        title: Option<&str>,
    ) -> Self {
        Self {
            conn,
            statements,
            pattern: title.map(like_pattern),
            _row: PhantomData,
        }
    }
}

impl<T> PageSource for SqlPage<'_, T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    type Item = T;

    async fn count(&mut self) -> RepositoryResult<u64> {
        let total: i64 = sqlx::query_scalar(self.statements.count)
            .bind(self.pattern.as_deref())
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Count, e))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn fetch(&mut self, offset: u64, limit: u64) -> RepositoryResult<Vec<T>> {
        sqlx::query_as::<_, T>(self.statements.fetch)
            .bind(self.pattern.as_deref())
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))
    }
}

/// A page source over an in-memory, already filtered and ordered vector
#[cfg(test)]
pub(crate) struct VecSource<T> {
    pub rows: Vec<T>,
    pub fetches: usize,
}

#[cfg(test)]
impl<T> VecSource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows, fetches: 0 }
    }
}

#[cfg(test)]
impl<T: Clone + Send + Sync> PageSource for VecSource<T> {
    type Item = T;

    async fn count(&mut self) -> RepositoryResult<u64> {
        Ok(self.rows.len() as u64)
    }

    async fn fetch(&mut self, offset: u64, limit: u64) -> RepositoryResult<Vec<T>> {
        self.fetches += 1;
        Ok(self
            .rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

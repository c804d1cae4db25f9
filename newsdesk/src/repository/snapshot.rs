use sqlx::{PgPool, Postgres, Transaction};

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::RepositoryResult;

/// Open a read-only `REPEATABLE READ` transaction
///
/// Every statement run inside sees the same snapshot, so a listing's count
/// and page always agree.
pub(crate) async fn begin_snapshot(pool: &PgPool) -> RepositoryResult<Transaction<'static, Postgres>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))?;

    Ok(tx)
}

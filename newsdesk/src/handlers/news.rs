//! `/news` handlers

use axum::{extract::State, http::StatusCode, Json};

use super::error::{ApiError, ApiOperation};
use super::extract::{ListRequest, ResourceId, ValidatedJson};
use crate::models::{News, NewsList, NewsPayload};
use crate::state::AppState;

/// `POST /news`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewsPayload>,
) -> Result<(StatusCode, Json<News>), ApiError> {
    let news = state.news().create(&payload).await?;
    tracing::info!(news_id = %news.id, "News created");
    Ok((StatusCode::CREATED, Json(news)))
}

/// `PUT /news/{id}`; forwards title, description, photo and published_by
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<NewsPayload>,
) -> Result<Json<News>, ApiError> {
    let news = state.news().update(id, &payload).await?;
    Ok(Json(news))
}

/// `DELETE /news/{id}` removes the row
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    state.news().delete(id).await?;
    tracing::info!(news_id = %id, "News deleted");
    Ok(StatusCode::OK)
}

/// `DELETE /news/soft/{id}` only stamps `deleted_at`
pub async fn soft_delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    state
        .news()
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::SoftDelete))?;
    tracing::info!(news_id = %id, "News soft deleted");
    Ok(StatusCode::OK)
}

/// `GET /news/{id}`, soft-deleted items included
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<News>, ApiError> {
    let news = state.news().get_by_id(id).await?;
    Ok(Json(news))
}

/// `GET /news/list?title=&page=&size=`
pub async fn list(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<Json<NewsList>, ApiError> {
    let page = state
        .news()
        .get_all(list.title.as_deref(), &list.pagination)
        .await?;
    Ok(Json(page.into()))
}

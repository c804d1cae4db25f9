//! `/blogs` handlers

use axum::{extract::State, http::StatusCode, Json};

use super::error::ApiError;
use super::extract::{ListRequest, ResourceId, ValidatedJson};
use crate::models::{Blog, BlogList, BlogPayload, News, NewsPayload};
use crate::state::AppState;

/// `POST /blogs`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BlogPayload>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let blog = state.blogs().create(&payload).await?;
    tracing::info!(blog_id = %blog.id, "Blog created");
    Ok((StatusCode::CREATED, Json(blog)))
}

/// `PUT /blogs/{id}`; only the title is forwarded
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<BlogPayload>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state.blogs().update(id, &payload).await?;
    Ok(Json(blog))
}

/// `DELETE /blogs/{id}`
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    state.blogs().delete(id).await?;
    tracing::info!(blog_id = %id, "Blog deleted");
    Ok(StatusCode::OK)
}

/// `GET /blogs/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Blog>, ApiError> {
    let blog = state.blogs().get_by_id(id).await?;
    Ok(Json(blog))
}

/// `GET /blogs/list?title=&page=&size=`
pub async fn list(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<Json<BlogList>, ApiError> {
    let page = state
        .blogs()
        .get_all(list.title.as_deref(), &list.pagination)
        .await?;
    Ok(Json(page.into()))
}

/// `POST /blogs/news`
pub async fn create_news(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewsPayload>,
) -> Result<(StatusCode, Json<News>), ApiError> {
    let news = state.blogs().create_news(&payload).await?;
    tracing::info!(news_id = %news.id, "News created from blog surface");
    Ok((StatusCode::CREATED, Json(news)))
}

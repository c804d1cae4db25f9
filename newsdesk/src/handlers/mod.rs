//! HTTP boundary for blogs and news
//!
//! Handlers parse identifiers and bodies, call the usecases held in
//! [`AppState`], and translate results into status codes:
//! 201 for creates, 200 for reads and updates, 200 with an empty body for
//! deletes. All failures go through [`ApiError`].

pub mod blog;
mod error;
mod extract;
pub mod news;

pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation, FieldViolation};
pub use extract::{ListRequest, ResourceId, ValidatedJson};

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::health;
use crate::state::AppState;

/// Build the full route table over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::readiness))
        .route("/blogs", post(blog::create))
        .route("/blogs/list", get(blog::list))
        .route("/blogs/news", post(blog::create_news))
        .route(
            "/blogs/{id}",
            get(blog::get_by_id).put(blog::update).delete(blog::delete),
        )
        .route("/news", post(news::create))
        .route("/news/list", get(news::list))
        .route("/news/soft/{id}", delete(news::soft_delete))
        .route(
            "/news/{id}",
            get(news::get_by_id).put(news::update).delete(news::delete),
        )
        .with_state(state)
}

//! Request extractors that reject with [`ApiError`]
//!
//! axum's stock extractors answer malformed input with plain-text bodies.
//! These wrappers run the same parsing and convert every failure into the
//! service's JSON error shape.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, Method},
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::{ApiError, ApiOperation, FieldViolation};
use crate::pagination::{ListParams, PaginationQuery};
use crate::state::AppState;

fn operation_for(method: &Method) -> ApiOperation {
    match *method {
        Method::POST => ApiOperation::Create,
        Method::PUT | Method::PATCH => ApiOperation::Update,
        Method::DELETE => ApiOperation::Delete,
        _ => ApiOperation::Get,
    }
}

/// The `{id}` path segment parsed as a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub Uuid);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(&parts.method);
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()).with_operation(operation))?;

        Uuid::parse_str(&raw).map(ResourceId).map_err(|_| {
            ApiError::bad_request(format!("'{}' is not a valid identifier", raw))
                .with_operation(operation)
                .with_detail(FieldViolation::new("id", "must be a UUID"))
        })
    }
}

/// A JSON body that passed its `garde` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(req.method());
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()).with_operation(operation))?;

        value
            .validate()
            .map_err(|report| ApiError::validation_failed(&report).with_operation(operation))?;

        Ok(Self(value))
    }
}

/// Title filter and pagination for list endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub title: Option<String>,
    pub pagination: PaginationQuery,
}

impl FromRequestParts<AppState> for ListRequest {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()).with_operation(ApiOperation::List))?;

        let pagination = params.pagination(&state.config().pagination)?;

        Ok(Self {
            title: params.title_filter().map(str::to_string),
            pagination,
        })
    }
}

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ListMeta, Paged};

/// A persisted blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied blog fields for create and update
///
/// Any `id` or `created_at` in the request body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BlogPayload {
    #[garde(length(chars, min = 3))]
    #[serde(default)]
    pub title: String,
}

/// Paged blog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogList {
    #[serde(flatten)]
    pub meta: ListMeta,
    pub blogs: Vec<Blog>,
}

impl From<Paged<Blog>> for BlogList {
    fn from(page: Paged<Blog>) -> Self {
        Self {
            meta: page.meta,
            blogs: page.items,
        }
    }
}

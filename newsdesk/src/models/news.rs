use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ListMeta, Paged};

/// A persisted news item
///
/// `deleted_at` is set once the item has been soft deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub photo: Option<Uuid>,
    pub published_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl News {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Client-supplied news fields for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewsPayload {
    #[garde(length(chars, min = 3))]
    #[serde(default)]
    pub title: String,

    #[garde(skip)]
    #[serde(default)]
    pub description: Option<String>,

    #[garde(skip)]
    #[serde(default)]
    pub photo: Option<Uuid>,

    #[garde(skip)]
    #[serde(default)]
    pub published_by: Option<Uuid>,
}

/// Paged news listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsList {
    #[serde(flatten)]
    pub meta: ListMeta,
    pub news: Vec<News>,
}

impl From<Paged<News>> for NewsList {
    fn from(page: Paged<News>) -> Self {
        Self {
            meta: page.meta,
            news: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_optional_fields() {
        let payload: NewsPayload = serde_json::from_str(r#"{"title":"Launch"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.description.is_none());
        assert!(payload.photo.is_none());
        assert!(payload.published_by.is_none());
    }

    #[test]
    fn test_payload_missing_title_fails_validation() {
        let payload: NewsPayload = serde_json::from_str(r#"{"description":"d"}"#).unwrap();
        let report = payload.validate().unwrap_err();
        let fields: Vec<String> = report.iter().map(|(path, _)| path.to_string()).collect();
        assert_eq!(fields, vec!["title".to_string()]);
    }

    #[test]
    fn test_news_serializes_deleted_at() {
        let news = News {
            id: Uuid::new_v4(),
            title: "Launch".into(),
            description: Some("d".into()),
            photo: None,
            published_by: None,
            created_at: Utc::now(),
            deleted_at: None,
        };
        assert!(!news.is_deleted());
        let json = serde_json::to_value(&news).unwrap();
        assert!(json["deleted_at"].is_null());
        assert_eq!(json["title"], "Launch");
    }
}

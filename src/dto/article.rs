//! Article DTOs as serialized by the CMS API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::article::{Article, ArticleDetail, ArticleStatus};
use crate::domain::types::{ArticleId, TypeConstraintError};

/// Listing row as it appears on the wire. The creation timestamp field is
/// named `created_date` by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub status: ArticleStatus,
    #[serde(rename = "created_date")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleDto> for Article {
    type Error = TypeConstraintError;

    fn try_from(dto: ArticleDto) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(dto.id)?,
            title: dto.title,
            category: dto.category,
            status: dto.status,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

/// Detail payload: a listing row plus the article body.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleDetailDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
    #[serde(rename = "created_date")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleDetailDto> for ArticleDetail {
    type Error = TypeConstraintError;

    fn try_from(dto: ArticleDetailDto) -> Result<Self, Self::Error> {
        Ok(ArticleDetail {
            id: ArticleId::new(dto.id)?,
            title: dto.title,
            content: dto.content,
            category: dto.category,
            status: dto.status,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_row_deserializes_and_converts() {
        let json = r#"{
            "id": 42,
            "title": "Intro to caching",
            "category": "Technology",
            "status": "Publish",
            "created_date": "2025-06-01T08:00:00Z",
            "updated_at": "2025-06-02T09:30:00Z"
        }"#;

        let dto: ArticleDto = serde_json::from_str(json).unwrap();
        let article = Article::try_from(dto).unwrap();
        assert_eq!(article.id.get(), 42);
        assert_eq!(article.status, ArticleStatus::Publish);
        assert_eq!(article.category, "Technology");
    }

    #[test]
    fn non_positive_id_is_rejected_at_conversion() {
        let dto = ArticleDto {
            id: 0,
            title: "x".into(),
            category: "y".into(),
            status: ArticleStatus::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(Article::try_from(dto).is_err());
    }
}

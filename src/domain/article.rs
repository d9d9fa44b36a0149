use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ArticleId;

/// Publication state of an article.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArticleStatus {
    Draft,
    Publish,
    Trash,
}

impl ArticleStatus {
    /// Returns the wire representation used in query strings and bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "Draft",
            ArticleStatus::Publish => "Publish",
            ArticleStatus::Trash => "Trash",
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Article row as shown in listings. Immutable snapshot of server state;
/// replaced wholesale by the next fetch, never mutated locally.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub category: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full article including its body, as returned by the detail endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleDetail {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleDetail {
    /// Drops the body, leaving the listing snapshot.
    pub fn into_summary(self) -> Article {
        Article {
            id: self.id,
            title: self.title,
            category: self.category,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Payload for creating an article.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
}

impl NewArticle {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        status: ArticleStatus,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
            category: category.into().trim().to_string(),
            status,
        }
    }
}

/// Payload for replacing an existing article.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
}

impl UpdateArticle {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        status: ArticleStatus,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
            category: category.into().trim().to_string(),
            status,
        }
    }
}

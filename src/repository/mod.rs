use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::article::{Article, ArticleDetail, ArticleStatus, NewArticle, UpdateArticle};
use crate::domain::types::{ArticleId, PageSize};
use crate::pagination::Page;
use crate::repository::errors::ApiResult;

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod rest;

/// Canonical serialization of a list query. Cache entries and in-flight
/// fetches are keyed by it; two queries with the same key are the same
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a paginated, filterable article listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleListQuery {
    pub page: usize,
    pub limit: PageSize,
    pub search: Option<String>,
    pub status: Option<ArticleStatus>,
}

impl ArticleListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: PageSize::default(),
            search: None,
            status: None,
        }
    }

    /// Preset used by the public listing: published articles only.
    pub fn published() -> Self {
        Self::new().status(ArticleStatus::Publish)
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: PageSize) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = normalize_search(search.into());
        self
    }

    pub fn status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Canonical key for this query.
    pub fn key(&self) -> QueryKey {
        QueryKey(format!(
            "page={}&limit={}&search={}&status={}",
            self.page,
            self.limit,
            self.search.as_deref().unwrap_or(""),
            self.status.map(ArticleStatus::as_str).unwrap_or(""),
        ))
    }
}

impl Default for ArticleListQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Trims a raw search term, treating whitespace-only input as no filter.
pub(crate) fn normalize_search(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[async_trait]
pub trait ArticleReader {
    async fn list_articles(&self, query: &ArticleListQuery) -> ApiResult<Page<Article>>;
    async fn get_article(&self, id: ArticleId) -> ApiResult<ArticleDetail>;
}

#[async_trait]
pub trait ArticleWriter {
    async fn create_article(&self, article: &NewArticle) -> ApiResult<ArticleDetail>;
    async fn update_article(
        &self,
        id: ArticleId,
        updates: &UpdateArticle,
    ) -> ApiResult<ArticleDetail>;
    async fn delete_article(&self, id: ArticleId) -> ApiResult<()>;
}

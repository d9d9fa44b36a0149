use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::domain::article::{Article, ArticleDetail, NewArticle, UpdateArticle};
use crate::domain::types::ArticleId;
use crate::dto::api::{ApiEnvelope, ErrorBody};
use crate::dto::article::{ArticleDetailDto, ArticleDto};
use crate::pagination::Page;
use crate::repository::errors::{ApiError, ApiResult};
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter};

/// REST implementation of [`ArticleReader`] and [`ArticleWriter`].
#[derive(Debug, Clone)]
pub struct RestArticleRepository {
    client: Client,
    base_url: Url,
}

impl RestArticleRepository {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::Unexpected(format!("failed to build HTTP client: {err}")))?;

        // A trailing slash keeps Url::join appending instead of replacing
        // the last path segment.
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|err| ApiError::Unexpected(format!("invalid base URL: {err}")))?;

        Ok(Self { client, base_url })
    }

    fn collection_url(&self, query: Option<&ArticleListQuery>) -> ApiResult<Url> {
        let mut url = self
            .base_url
            .join("article")
            .map_err(|err| ApiError::Unexpected(format!("failed to build article URL: {err}")))?;

        if let Some(query) = query {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(search) = &query.search {
                pairs.append_pair("search", search);
            }
            if let Some(status) = query.status {
                pairs.append_pair("status", status.as_str());
            }
        }

        Ok(url)
    }

    fn item_url(&self, id: ArticleId) -> ApiResult<Url> {
        self.base_url
            .join(&format!("article/{id}"))
            .map_err(|err| ApiError::Unexpected(format!("failed to build article URL: {err}")))
    }
}

/// Maps a non-success status to the error taxonomy, preferring the
/// server-provided message when one was extracted from the body.
fn status_error(status: StatusCode, message: Option<String>) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        s if s.is_client_error() => ApiError::Validation(
            message.unwrap_or_else(|| format!("request rejected with status {s}")),
        ),
        s if s.is_server_error() => {
            ApiError::Server(message.unwrap_or_else(|| format!("server returned status {s}")))
        }
        s => ApiError::Unexpected(format!("unexpected status {s}")),
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty());
    status_error(status, message)
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> ApiResult<ApiEnvelope<T>> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<ApiEnvelope<T>>()
        .await
        .map_err(ApiError::from)
}

#[async_trait]
impl ArticleReader for RestArticleRepository {
    async fn list_articles(&self, query: &ArticleListQuery) -> ApiResult<Page<Article>> {
        let url = self.collection_url(Some(query))?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await.map_err(ApiError::from)?;
        let envelope = read_envelope::<Vec<ArticleDto>>(response).await?;

        let items = envelope
            .data
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let pagination = envelope
            .pagination
            .ok_or_else(|| ApiError::Unexpected("list response missing pagination".into()))?;

        Ok(Page::new(
            items,
            query.page,
            query.limit.get(),
            pagination.total,
        ))
    }

    async fn get_article(&self, id: ArticleId) -> ApiResult<ArticleDetail> {
        let url = self.item_url(id)?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await.map_err(ApiError::from)?;
        let envelope = read_envelope::<ArticleDetailDto>(response).await?;

        Ok(envelope.data.try_into()?)
    }
}

#[async_trait]
impl ArticleWriter for RestArticleRepository {
    async fn create_article(&self, article: &NewArticle) -> ApiResult<ArticleDetail> {
        let url = self.collection_url(None)?;
        log::debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .json(article)
            .send()
            .await
            .map_err(ApiError::from)?;
        let envelope = read_envelope::<ArticleDetailDto>(response).await?;

        Ok(envelope.data.try_into()?)
    }

    async fn update_article(
        &self,
        id: ArticleId,
        updates: &UpdateArticle,
    ) -> ApiResult<ArticleDetail> {
        let url = self.item_url(id)?;
        log::debug!("PUT {url}");

        let response = self
            .client
            .put(url)
            .json(updates)
            .send()
            .await
            .map_err(ApiError::from)?;
        let envelope = read_envelope::<ArticleDetailDto>(response).await?;

        Ok(envelope.data.try_into()?)
    }

    async fn delete_article(&self, id: ArticleId) -> ApiResult<()> {
        let url = self.item_url(id)?;
        log::debug!("DELETE {url}");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(ApiError::from)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

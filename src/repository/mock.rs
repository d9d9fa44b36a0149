//! Mock repository implementations for isolating consumers in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::article::{Article, ArticleDetail, NewArticle, UpdateArticle};
use crate::domain::types::ArticleId;
use crate::pagination::Page;
use crate::repository::errors::ApiResult;
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter};

mock! {
    pub ArticleRepository {}

    #[async_trait]
    impl ArticleReader for ArticleRepository {
        async fn list_articles(&self, query: &ArticleListQuery) -> ApiResult<Page<Article>>;
        async fn get_article(&self, id: ArticleId) -> ApiResult<ArticleDetail>;
    }

    #[async_trait]
    impl ArticleWriter for ArticleRepository {
        async fn create_article(&self, article: &NewArticle) -> ApiResult<ArticleDetail>;
        async fn update_article(
            &self,
            id: ArticleId,
            updates: &UpdateArticle,
        ) -> ApiResult<ArticleDetail>;
        async fn delete_article(&self, id: ArticleId) -> ApiResult<()>;
    }
}

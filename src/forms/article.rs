use serde::Deserialize;
use validator::Validate;

use crate::domain::article::{ArticleStatus, NewArticle, UpdateArticle};
use crate::forms::FormError;

/// Raw input from the article create/edit screens. The status is not part of
/// the form itself; it is chosen by the submit action (publish vs. draft).
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ArticleForm {
    #[validate(length(min = 2, message = "title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "content must be at least 10 characters"))]
    pub content: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
}

impl ArticleForm {
    /// Validates the form and builds a creation payload with the chosen status.
    pub fn into_new_article(self, status: ArticleStatus) -> Result<NewArticle, FormError> {
        self.validate()?;
        Ok(NewArticle::new(
            self.title,
            self.content,
            self.category,
            status,
        ))
    }

    /// Validates the form and builds a replacement payload with the chosen status.
    pub fn into_update_article(self, status: ArticleStatus) -> Result<UpdateArticle, FormError> {
        self.validate()?;
        Ok(UpdateArticle::new(
            self.title,
            self.content,
            self.category,
            status,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ArticleForm {
        ArticleForm {
            title: "Caching 101".into(),
            content: "A long enough body for the form".into(),
            category: "Technology".into(),
        }
    }

    #[test]
    fn valid_form_builds_a_trimmed_payload() {
        let mut form = valid_form();
        form.title = "  Caching 101  ".into();

        let article = form.into_new_article(ArticleStatus::Publish).unwrap();
        assert_eq!(article.title, "Caching 101");
        assert_eq!(article.status, ArticleStatus::Publish);
    }

    #[test]
    fn short_title_is_rejected() {
        let mut form = valid_form();
        form.title = "x".into();
        assert!(form.into_new_article(ArticleStatus::Draft).is_err());
    }

    #[test]
    fn short_content_is_rejected() {
        let mut form = valid_form();
        form.content = "too short".into();
        assert!(form.into_update_article(ArticleStatus::Draft).is_err());
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut form = valid_form();
        form.category = String::new();
        assert!(form.into_new_article(ArticleStatus::Draft).is_err());
    }
}

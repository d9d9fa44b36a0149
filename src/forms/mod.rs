//! Form payloads backing the create and edit article flows.

use thiserror::Error;
use validator::ValidationErrors;

pub mod article;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
}

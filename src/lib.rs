//! Client-side core of the article CMS: the paginated, filterable article
//! list view-model and the REST repository it fetches from.
//!
//! The UI layer (public listing and authenticated dashboard table) renders
//! [`viewmodel::list::ListSnapshot`]s and drives the model through its
//! imperative operations; everything network-facing goes through the
//! [`repository`] traits so screens can be exercised against test doubles.

pub mod config;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;
pub mod repository;
pub mod viewmodel;

pub use crate::config::ApiConfig;
pub use crate::repository::rest::RestArticleRepository;
pub use crate::viewmodel::list::{ArticleListModel, ListSnapshot};

//! Stateful view-model shared by the public article listing and the
//! dashboard table.

use serde::Serialize;

pub mod debounce;
pub mod fetch;
pub mod list;

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot user-facing message, rendered by the UI layer as a dismissible
/// toast. Drained via [`list::ArticleListModel::take_notices`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

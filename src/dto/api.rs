//! Response envelope shared by every CMS endpoint.

use serde::Deserialize;

/// Standard envelope wrapping the payload of a successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub message: String,
    pub data: T,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub path: String,
}

/// Pagination block attached to list responses.
///
/// Only `total` is trusted; the derived flags are recomputed locally so they
/// can never disagree with page/limit.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// Lenient view of an error response body, used to extract the
/// server-provided message when one is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

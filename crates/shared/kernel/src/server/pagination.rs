use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokedex_domain::pagination::Pagination;
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::IntoParams;

/// Rejected pagination parameters.
#[derive(Debug, thiserror::Error)]
#[error("Invalid pagination: {message}")]
pub struct PaginationError {
    pub message: Cow<'static, str>,
}

impl IntoResponse for PaginationError {
    fn into_response(self) -> Response {
        super::error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// Raw `?limit=&offset=` query parameters.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Maximum number of records to return (>= 1).
    pub limit: Option<u64>,
    /// Number of records to skip.
    pub offset: Option<u64>,
}

impl PaginationQuery {
    /// Applies defaults and validates the window.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `limit` is zero.
    pub fn resolve(self, default_limit: u64) -> Result<Pagination, PaginationError> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit == 0 {
            return Err(PaginationError { message: "limit must be a positive number".into() });
        }
        Ok(Pagination::new(limit, self.offset.unwrap_or_default()))
    }
}

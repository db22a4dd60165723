//! Error responses for the HTTP API.
//!
//! Every error body has the shape `{"detail": "<message>"}` and the message
//! embeds the underlying cause.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::errors::SummaryError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// The request body could not be read as a `SummaryRequest`.
    #[error("Invalid request body: {0}")]
    Rejected(#[from] JsonRejection),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Summary(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Rejected(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        error!(status = status.as_u16(), error = %detail, "Request failed");

        err_response(status, &detail)
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

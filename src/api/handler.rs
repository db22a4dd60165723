//! HTTP handlers.

use std::panic::AssertUnwindSafe;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use futures::FutureExt;
use serde_json::{Value, json};
use tracing::{error, info};

use super::helpers::ApiResult;
use super::state::AppState;
use crate::core::models::{SummaryRequest, SummaryResult};
use crate::errors::SummaryError;
use crate::features::summarize_video;

pub const HEALTH_MESSAGE: &str = "AI-DVSum Backend is Running!";

/// `GET /`
pub async fn health() -> Json<Value> {
    Json(json!({ "message": HEALTH_MESSAGE }))
}

/// `POST /summarize`
///
/// Structured pipeline errors pass through as-is. A panic anywhere in the
/// pipeline is reported as [`SummaryError::Unexpected`].
#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<Json<SummaryResult>> {
    let Json(request) = payload?;
    info!(video_url = %request.video_url, "Summary requested");

    let outcome = AssertUnwindSafe(summarize_video(
        state.transcripts.as_ref(),
        &state.summarizer,
        &request,
    ))
    .catch_unwind()
    .await;

    let result = outcome.unwrap_or_else(|panic| {
        let cause = panic
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "summarization task panicked".to_string());
        error!(error = %cause, "Summarization panicked");
        Err(SummaryError::Unexpected(cause))
    })?;

    Ok(Json(result))
}

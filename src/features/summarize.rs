use tracing::info;

use crate::ai::Summarizer;
use crate::core::models::{SummaryRequest, SummaryResult};
use crate::errors::SummaryError;
use crate::transcript::{TranscriptProvider, fetch_formatted_transcript};
use crate::utils::VideoReference;

/// Resolve the URL, fetch and format its transcript, then summarize it.
///
/// Each stage only runs once the previous one has succeeded, so an invalid URL
/// never reaches the transcript provider and a missing transcript never
/// reaches the model.
///
/// # Errors
///
/// Returns the [`SummaryError`] of whichever stage failed first.
pub async fn summarize_video(
    transcripts: &dyn TranscriptProvider,
    summarizer: &Summarizer,
    request: &SummaryRequest,
) -> Result<SummaryResult, SummaryError> {
    let video = VideoReference::parse(&request.video_url)?;
    info!(video_id = %video, "Resolved video");

    let transcript = fetch_formatted_transcript(transcripts, &video).await?;
    summarizer.summarize(&transcript).await
}

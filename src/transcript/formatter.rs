use tracing::{error, info};

use super::client::TranscriptProvider;
use crate::core::models::TranscriptSegment;
use crate::errors::SummaryError;
use crate::utils::VideoReference;

/// `[MM:SS]` for an offset in seconds. Minutes are not capped, so anything
/// past 99 minutes simply renders with more digits.
#[must_use]
pub fn format_timestamp(offset_seconds: u64) -> String {
    format!("[{:02}:{:02}]", offset_seconds / 60, offset_seconds % 60)
}

/// Render segments as `[MM:SS] text ` tokens in order.
#[must_use]
pub fn format_segments(segments: &[TranscriptSegment]) -> String {
    segments.iter().fold(String::new(), |mut out, segment| {
        out.push_str(&format!(
            "{} {} ",
            format_timestamp(segment.offset_seconds),
            segment.text
        ));
        out
    })
}

/// Fetch the transcript for `video` and render it as one annotated block.
///
/// # Errors
///
/// Returns [`SummaryError::TranscriptUnavailable`] if the provider fails or
/// yields no segments.
pub async fn fetch_formatted_transcript(
    provider: &dyn TranscriptProvider,
    video: &VideoReference,
) -> Result<String, SummaryError> {
    let segments = provider.fetch_transcript(video).await.map_err(|e| {
        error!(video_id = %video, error = %e, "Transcript lookup failed");
        match e {
            SummaryError::TranscriptUnavailable(_) => e,
            other => SummaryError::TranscriptUnavailable(other.to_string()),
        }
    })?;

    if segments.is_empty() {
        error!(video_id = %video, "Transcript provider returned no segments");
        return Err(SummaryError::TranscriptUnavailable(format!(
            "transcript for video {video} is empty"
        )));
    }

    info!(video_id = %video, segments = segments.len(), "Formatting transcript");
    Ok(format_segments(&segments))
}

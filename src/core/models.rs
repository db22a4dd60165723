use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub video_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
}

/// One caption unit as returned by the transcript provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub offset_seconds: u64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(offset_seconds: u64, text: impl Into<String>) -> Self {
        Self {
            offset_seconds,
            text: text.into(),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrlKind(String),

    #[error("Could not retrieve transcript: {0}")]
    TranscriptUnavailable(String),

    #[error("No Gemini model could be initialized: {0}")]
    ModelUnavailable(String),

    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl SummaryError {
    /// HTTP status the API layer answers with for this error.
    ///
    /// Caller-side faults (a URL we cannot read, a video without captions) are
    /// 400; everything on the model side or uncategorized is 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummaryError::InvalidUrlKind(_) | SummaryError::TranscriptUnavailable(_) => 400,
            SummaryError::ModelUnavailable(_)
            | SummaryError::GenerationFailed(_)
            | SummaryError::Unexpected(_) => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

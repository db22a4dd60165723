use std::sync::Arc;

use crate::ai::{GeminiClient, ModelConfig, Summarizer};
use crate::core::config::AppConfig;
use crate::errors::SummaryError;
use crate::transcript::{TranscriptProvider, YouTubeTranscriptClient};

/// Read-only handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub transcripts: Arc<dyn TranscriptProvider>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    #[must_use]
    pub fn new(transcripts: Arc<dyn TranscriptProvider>, summarizer: Summarizer) -> Self {
        Self {
            transcripts,
            summarizer: Arc::new(summarizer),
        }
    }

    /// Wire the production YouTube and Gemini clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let transcripts = Arc::new(YouTubeTranscriptClient::new()?);
        let gemini = Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
        )?);
        let summarizer = Summarizer::new(gemini, ModelConfig::from_app_config(config));

        Ok(Self::new(transcripts, summarizer))
    }
}

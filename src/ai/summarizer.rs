use std::sync::Arc;

use tracing::{error, info, warn};

use super::client::{ModelHandle, ModelProvider};
use super::config::ModelConfig;
use super::fallback::{Selection, first_success};
use super::prompt_builder::build_prompt;
use crate::core::models::SummaryResult;
use crate::errors::SummaryError;

/// Turns a formatted transcript into a summary with one model call.
pub struct Summarizer {
    provider: Arc<dyn ModelProvider>,
    config: ModelConfig,
}

impl Summarizer {
    #[must_use]
    pub fn new(provider: Arc<dyn ModelProvider>, config: ModelConfig) -> Self {
        Self { provider, config }
    }

    /// Pick the first candidate model that initializes.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ModelUnavailable`] listing every attempt when no
    /// candidate initializes.
    pub async fn select_model(&self) -> Result<ModelHandle, SummaryError> {
        let provider = &self.provider;
        let selection = first_success(&self.config.candidates, |name| async move {
            provider.initialize(&name).await
        })
        .await;

        for (name, e) in selection.failures() {
            warn!(model = %name, error = %e, "Model initialization failed, trying next candidate");
        }

        match selection {
            Selection::Selected { name, value, .. } => {
                info!(model = %name, "Selected model");
                Ok(value)
            }
            Selection::Exhausted { failures } => {
                let detail = if failures.is_empty() {
                    "no candidate models configured".to_string()
                } else {
                    failures
                        .iter()
                        .map(|(name, e)| format!("{name}: {e}"))
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                error!(error = %detail, "All candidate models failed to initialize");
                Err(SummaryError::ModelUnavailable(detail))
            }
        }
    }

    /// Summarize a formatted transcript.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ModelUnavailable`] if no model initializes and
    /// [`SummaryError::GenerationFailed`] if the call fails or yields no text.
    pub async fn summarize(&self, transcript: &str) -> Result<SummaryResult, SummaryError> {
        let model = self.select_model().await?;
        let prompt = build_prompt(transcript);

        let generated = self
            .provider
            .generate(&model, &prompt, &self.config)
            .await
            .map_err(|e| {
                error!(model = %model.name, error = %e, "Summary generation failed");
                match e {
                    SummaryError::GenerationFailed(_) => e,
                    other => SummaryError::GenerationFailed(other.to_string()),
                }
            })?;

        let Some(summary) = generated else {
            error!(model = %model.name, "Model returned no text");
            return Err(SummaryError::GenerationFailed(format!(
                "model {} returned no text",
                model.name
            )));
        };

        info!(model = %model.name, summary_chars = summary.chars().count(), "Summary generated");
        Ok(SummaryResult { summary })
    }
}

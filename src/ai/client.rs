//! LLM (Gemini) API client module
//!
//! Encapsulates model lookup and content generation against the Generative
//! Language REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::config::ModelConfig;
use crate::errors::SummaryError;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// A model name the provider has accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    pub name: String,
}

/// Generative-language provider seam.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Resolve `model_name` into a usable handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be used, for example because it
    /// does not exist or the credentials are rejected.
    async fn initialize(&self, model_name: &str) -> Result<ModelHandle, SummaryError>;

    /// Generate text for `prompt`. `Ok(None)` means the call succeeded but
    /// produced no text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    async fn generate(
        &self,
        model: &ModelHandle,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<Option<String>, SummaryError>;
}

/// Gemini API client. The API key is fixed at construction.
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    api_base: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, SummaryError> {
        let http = Client::builder().build().map_err(|e| {
            SummaryError::Unexpected(format!("Failed to build Gemini HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn model_url(&self, model_name: &str) -> String {
        format!("{}/v1beta/models/{model_name}", self.api_base)
    }

    fn api_key(&self) -> Result<&str, SummaryError> {
        self.api_key.as_deref().ok_or_else(|| {
            SummaryError::ModelUnavailable("GEMINI_API_KEY is not configured".to_string())
        })
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn initialize(&self, model_name: &str) -> Result<ModelHandle, SummaryError> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .get(self.model_url(model_name))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| SummaryError::ModelUnavailable(format!("model lookup failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummaryError::ModelUnavailable(format!(
                "model {model_name} rejected (status {status}): {error_text}"
            )));
        }

        debug!(model = %model_name, "Gemini model initialized");
        Ok(ModelHandle {
            name: model_name.to_string(),
        })
    }

    async fn generate(
        &self,
        model: &ModelHandle,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<Option<String>, SummaryError> {
        let api_key = self.api_key()?;

        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        info!(
            model = %model.name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Generating summary"
        );

        let request_body = build_request_body(prompt, config);

        let response = self
            .http
            .post(format!("{}:generateContent", self.model_url(&model.name)))
            .header(API_KEY_HEADER, api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                SummaryError::GenerationFailed(format!("Gemini API request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummaryError::GenerationFailed(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummaryError::GenerationFailed(format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(reason) = response_json
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            warn!(model = %model.name, block_reason = %reason, "Prompt was blocked");
        }

        Ok(extract_text(&response_json))
    }
}

/// Request body for `models/{name}:generateContent`.
#[must_use]
pub fn build_request_body(prompt: &str, config: &ModelConfig) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": config.generation,
        "safetySettings": config.safety_settings,
    })
}

/// Concatenate the text parts of the first candidate. Blank output is `None`.
#[must_use]
pub fn extract_text(response_json: &Value) -> Option<String> {
    let parts = response_json
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

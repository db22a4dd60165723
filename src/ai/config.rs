//! Fixed generation and safety parameters sent with every Gemini request.

use serde::Serialize;

use crate::core::config::AppConfig;

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

pub const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

#[must_use]
pub fn default_safety_settings() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|&category| SafetySetting {
            category,
            threshold: SAFETY_THRESHOLD,
        })
        .collect()
}

/// Candidate model names, primary first, plus the request parameters.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub candidates: Vec<String>,
    pub generation: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl ModelConfig {
    #[must_use]
    pub fn new(primary: impl Into<String>, fallbacks: impl IntoIterator<Item = String>) -> Self {
        let mut candidates = vec![primary.into()];
        for name in fallbacks {
            if !candidates.contains(&name) {
                candidates.push(name);
            }
        }

        Self {
            candidates,
            generation: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.gemini_model.clone(),
            config.gemini_fallback_models.iter().cloned(),
        )
    }
}

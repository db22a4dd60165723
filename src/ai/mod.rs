//! All AI/LLM functionality

pub mod client;
pub mod config;
pub mod fallback;
pub mod prompt_builder;
pub mod summarizer;

// Re-export main types for convenience
pub use client::{GeminiClient, ModelHandle, ModelProvider, estimate_tokens};
pub use config::ModelConfig;
pub use summarizer::Summarizer;

//! In-process fakes for the transcript and model providers.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dvsum::ai::{ModelConfig, ModelHandle, ModelProvider, Summarizer};
use dvsum::api::{AppState, build_router};
use dvsum::core::models::TranscriptSegment;
use dvsum::errors::SummaryError;
use dvsum::transcript::TranscriptProvider;
use dvsum::utils::VideoReference;

pub enum TranscriptBehavior {
    Segments(Vec<TranscriptSegment>),
    Unavailable(&'static str),
    Panic,
}

pub struct FakeTranscripts {
    behavior: TranscriptBehavior,
    pub requested: Mutex<Vec<String>>,
}

impl FakeTranscripts {
    pub fn new(behavior: TranscriptBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn with_segments(segments: Vec<TranscriptSegment>) -> Arc<Self> {
        Self::new(TranscriptBehavior::Segments(segments))
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptProvider for FakeTranscripts {
    async fn fetch_transcript(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<TranscriptSegment>, SummaryError> {
        self.requested.lock().unwrap().push(video.id().to_string());
        match &self.behavior {
            TranscriptBehavior::Segments(segments) => Ok(segments.clone()),
            TranscriptBehavior::Unavailable(reason) => {
                Err(SummaryError::TranscriptUnavailable((*reason).to_string()))
            }
            TranscriptBehavior::Panic => panic!("transcript provider exploded"),
        }
    }
}

pub enum GenerateBehavior {
    Text(&'static str),
    Empty,
    Fail(&'static str),
}

pub struct FakeModel {
    failing: HashSet<String>,
    generate: GenerateBehavior,
    pub initialized: Mutex<Vec<String>>,
    pub generated_with: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
    generate_calls: AtomicUsize,
}

impl FakeModel {
    pub fn new(failing: &[&str], generate: GenerateBehavior) -> Arc<Self> {
        Arc::new(Self {
            failing: failing.iter().map(|s| (*s).to_string()).collect(),
            generate,
            initialized: Mutex::new(Vec::new()),
            generated_with: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            generate_calls: AtomicUsize::new(0),
        })
    }

    pub fn replying(text: &'static str) -> Arc<Self> {
        Self::new(&[], GenerateBehavior::Text(text))
    }

    pub fn initialized(&self) -> Vec<String> {
        self.initialized.lock().unwrap().clone()
    }

    pub fn generated_with(&self) -> Vec<String> {
        self.generated_with.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for FakeModel {
    async fn initialize(&self, model_name: &str) -> Result<ModelHandle, SummaryError> {
        self.initialized.lock().unwrap().push(model_name.to_string());
        if self.failing.contains(model_name) {
            return Err(SummaryError::ModelUnavailable(format!(
                "models/{model_name} is not found"
            )));
        }
        Ok(ModelHandle {
            name: model_name.to_string(),
        })
    }

    async fn generate(
        &self,
        model: &ModelHandle,
        prompt: &str,
        _config: &ModelConfig,
    ) -> Result<Option<String>, SummaryError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.generated_with.lock().unwrap().push(model.name.clone());
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.generate {
            GenerateBehavior::Text(text) => Ok(Some((*text).to_string())),
            GenerateBehavior::Empty => Ok(None),
            GenerateBehavior::Fail(reason) => {
                Err(SummaryError::GenerationFailed((*reason).to_string()))
            }
        }
    }
}

/// Primary plus two fallbacks, in order.
pub fn test_model_config() -> ModelConfig {
    ModelConfig::new(
        "primary-model",
        vec!["fallback-one".to_string(), "fallback-two".to_string()],
    )
}

pub fn summarizer_with(model: Arc<FakeModel>) -> Summarizer {
    Summarizer::new(model, test_model_config())
}

/// Build the full application router over the given fakes.
pub fn build_test_app(transcripts: Arc<FakeTranscripts>, model: Arc<FakeModel>) -> Router {
    build_router(AppState::new(transcripts, summarizer_with(model)))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

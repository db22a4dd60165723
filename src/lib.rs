/// DVSum - summarizes YouTube videos from their caption transcripts using Gemini.
///
/// A request flows through four stages, each a module of this crate:
/// 1. `utils::links` resolves the video URL into a [`utils::VideoReference`]
/// 2. `transcript` fetches the captions and renders them as `[MM:SS] text` tokens
/// 3. `ai` builds the prompt, selects the first Gemini model that initializes,
///    and generates the summary
/// 4. `api` exposes the pipeline over HTTP and maps failures onto status codes
///
/// # Architecture
///
/// The system uses:
/// - axum and tower-http for the HTTP server, CORS, and request tracing
/// - reqwest for the YouTube and Gemini REST calls
/// - async-trait seams (`TranscriptProvider`, `ModelProvider`) so the pipeline
///   runs against in-process fakes in tests
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use dvsum::api::{AppState, build_router};
/// use dvsum::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     dvsum::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let app = build_router(AppState::from_config(&config)?);
///
///     let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod transcript;
pub mod utils;

/// Configure structured logging with JSON output.
///
/// The filter comes from `RUST_LOG` when set and otherwise defaults to
/// `dvsum=info,tower_http=info`. Call once at process start.
///
/// # Example
///
/// ```
/// dvsum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dvsum=info,tower_http=info".into());
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

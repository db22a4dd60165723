//! HTTP API: routing, handlers, and error responses

pub mod handler;
pub mod helpers;
pub mod router;
pub mod state;

pub use helpers::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;

//! Axum HTTP API server.
//!
//! This crate provides:
//! - The multipart upload endpoint that synthesizes SEO content and
//!   publishes the video
//! - Category and language listings for upload forms
//! - Rate limiting, security headers and request tracing
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{UploadOrchestrator, UploadResponse, UploadSubmission};
pub use state::AppState;

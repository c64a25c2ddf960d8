//! Publish pipeline.
//!
//! This crate provides:
//! - The `PublishBackend` seam a real platform client would implement
//! - A simulated backend with fixed latency and synthetic identifiers
//! - The pipeline driving `Pending -> Uploading -> Published | Failed`
//!   with per-attempt timeouts and retry with exponential backoff

pub mod backend;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod retry;
pub mod simulated;

pub use backend::PublishBackend;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{PipelineConfig, PublishPipeline};
pub use retry::RetryConfig;
pub use simulated::SimulatedPublisher;

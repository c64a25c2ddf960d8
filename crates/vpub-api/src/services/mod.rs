//! Business logic services.

pub mod orchestrator;

pub use orchestrator::{UploadOrchestrator, UploadResponse, UploadSubmission};

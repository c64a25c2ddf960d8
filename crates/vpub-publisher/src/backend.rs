//! Backend seam for publishing.

use async_trait::async_trait;

use vpub_models::{PublishOutcome, PublishRequest};

/// A video platform the pipeline can publish to.
///
/// Implementations report failures as [`PublishOutcome::Failed`] instead of
/// erroring, marking whether a retry with the same idempotency key may
/// succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishBackend: Send + Sync {
    /// Short name for logs and metric labels.
    fn name(&self) -> &'static str;

    /// Make a single publish attempt.
    async fn publish(&self, request: &PublishRequest) -> PublishOutcome;
}

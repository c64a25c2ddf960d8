//! Publish pipeline.
//!
//! Drives one request through `Pending -> Uploading -> Published | Failed`.
//! Each attempt is bounded by a timeout. Transient failures and timeouts
//! are retried with exponential backoff under the same idempotency key;
//! permanent failures stop immediately.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use uuid::Uuid;

use vpub_models::{
    GeneratedContent, MediaRef, PublishFailure, PublishOptions, PublishOutcome, PublishRequest,
    PublishResult, PublishState,
};

use crate::backend::PublishBackend;
use crate::error::{PipelineError, PipelineResult};
use crate::metrics;
use crate::retry::RetryConfig;

/// Pipeline tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound for a single backend attempt
    pub attempt_timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Longest time one `submit` can take: every attempt hitting the
    /// timeout plus the backoff between them.
    pub fn worst_case_duration(&self) -> Duration {
        let attempts = self.retry.max_attempts();
        let backoff: Duration = (1..attempts)
            .map(|attempt| self.retry.delay_for_attempt(attempt))
            .sum();
        self.attempt_timeout.saturating_mul(attempts) + backoff
    }
}

/// Why a single attempt did not publish.
enum AttemptFailure {
    Backend(PublishFailure),
    Timeout,
}

impl AttemptFailure {
    fn is_retryable(&self) -> bool {
        match self {
            AttemptFailure::Backend(failure) => failure.retryable,
            AttemptFailure::Timeout => true,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AttemptFailure::Backend(f) if f.retryable => "transient",
            AttemptFailure::Backend(_) => "permanent",
            AttemptFailure::Timeout => "timeout",
        }
    }
}

/// Publishes generated content through a backend.
#[derive(Clone)]
pub struct PublishPipeline {
    backend: Arc<dyn PublishBackend>,
    config: PipelineConfig,
}

impl PublishPipeline {
    pub fn new(backend: Arc<dyn PublishBackend>) -> Self {
        Self {
            backend,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Publish media with its generated content.
    pub async fn publish(
        &self,
        media: MediaRef,
        content: GeneratedContent,
        options: PublishOptions,
    ) -> PipelineResult<PublishResult> {
        let request = PublishRequest::new(media, content, options);
        self.submit(&request).await
    }

    /// Run a prepared request to a terminal state.
    pub async fn submit(&self, request: &PublishRequest) -> PipelineResult<PublishResult> {
        let backend = self.backend.name();
        let key = request.idempotency_key;
        let started = Instant::now();
        let mut state = PublishState::Pending;
        let mut attempt = 0u32;

        debug!(
            idempotency_key = %key,
            backend,
            media = %request.media,
            language = %request.options.language,
            monetization = request.options.monetization,
            "Publish accepted"
        );

        loop {
            attempt += 1;
            transition(&mut state, PublishState::Uploading, &key, attempt);

            let failure = match tokio::time::timeout(
                self.config.attempt_timeout,
                self.backend.publish(request),
            )
            .await
            {
                Ok(PublishOutcome::Published(result)) => {
                    transition(&mut state, PublishState::Published, &key, attempt);
                    metrics::record_attempt(backend, "published");
                    metrics::record_publish_duration(backend, true, started.elapsed().as_secs_f64());
                    info!(
                        idempotency_key = %key,
                        backend,
                        video_id = %result.id,
                        attempts = attempt,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "Publish completed"
                    );
                    return Ok(result);
                }
                Ok(PublishOutcome::Failed(failure)) => AttemptFailure::Backend(failure),
                Err(_) => AttemptFailure::Timeout,
            };

            transition(&mut state, PublishState::Failed, &key, attempt);
            metrics::record_attempt(backend, failure.label());

            if failure.is_retryable() && attempt < self.config.retry.max_attempts() {
                let delay = self.config.retry.delay_for_attempt(attempt);
                warn!(
                    idempotency_key = %key,
                    backend,
                    attempt,
                    outcome = failure.label(),
                    delay_ms = delay.as_millis() as u64,
                    "Publish attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            metrics::record_publish_duration(backend, false, started.elapsed().as_secs_f64());
            let error = self.final_error(failure, attempt);
            warn!(idempotency_key = %key, backend, error = %error, "Publish failed");
            return Err(error);
        }
    }

    fn final_error(&self, failure: AttemptFailure, attempts: u32) -> PipelineError {
        match failure {
            AttemptFailure::Backend(f) if f.retryable => PipelineError::Exhausted {
                reason: f.reason,
                attempts,
            },
            AttemptFailure::Backend(f) => PipelineError::Rejected {
                reason: f.reason,
                attempts,
            },
            AttemptFailure::Timeout => PipelineError::TimedOut {
                timeout: self.config.attempt_timeout,
                attempts,
            },
        }
    }
}

fn transition(state: &mut PublishState, next: PublishState, key: &Uuid, attempt: u32) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal publish transition {state} -> {next}"
    );
    debug!(
        idempotency_key = %key,
        attempt,
        from = %state,
        to = %next,
        terminal = next.is_terminal(),
        "Publish state change"
    );
    *state = next;
}

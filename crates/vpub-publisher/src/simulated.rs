//! Simulated platform backend.
//!
//! Waits a fixed latency, then reports success with a synthetic
//! identifier. Nothing leaves the process.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use vpub_models::{
    Clock, PublishId, PublishOutcome, PublishRequest, PublishResult, PublishStatus, RandomSource,
    SystemClock, ThreadRandom,
};

use crate::backend::PublishBackend;

/// Prefix of every simulated identifier.
pub const ID_PREFIX: &str = "SIM";

/// Random characters after the prefix.
pub const ID_SUFFIX_LEN: usize = 6;

/// Default simulated upload time.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(2);

/// Backend that always publishes after a fixed delay.
#[derive(Clone)]
pub struct SimulatedPublisher {
    latency: Duration,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl SimulatedPublisher {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            random: Arc::new(ThreadRandom),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn next_id(&self) -> PublishId {
        PublishId::from_string(format!(
            "{}{}",
            ID_PREFIX,
            self.random.upper_alphanumeric(ID_SUFFIX_LEN)
        ))
    }
}

impl Default for SimulatedPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl PublishBackend for SimulatedPublisher {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn publish(&self, request: &PublishRequest) -> PublishOutcome {
        debug!(
            idempotency_key = %request.idempotency_key,
            media = %request.media,
            latency_ms = self.latency.as_millis() as u64,
            "Simulating upload"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        PublishOutcome::Published(PublishResult {
            id: self.next_id(),
            status: PublishStatus::Uploaded,
            published_at: self.clock.now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Instant;
    use vpub_models::{FixedClock, FixedIndex, GeneratedContent, MediaRef, PublishOptions};

    fn request() -> PublishRequest {
        PublishRequest::new(
            MediaRef::url("https://example.com/video.mp4"),
            GeneratedContent {
                title: "t".into(),
                description: "d".into(),
                hashtags: vec!["#t".into()],
                tags: vec!["t".into()],
                thumbnail_prompt: "p".into(),
            },
            PublishOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_simulated_publish_result() {
        let at = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
        let publisher = SimulatedPublisher::new(Duration::ZERO)
            .with_random(Arc::new(FixedIndex(1)))
            .with_clock(Arc::new(FixedClock(at)));

        match publisher.publish(&request()).await {
            PublishOutcome::Published(result) => {
                assert_eq!(result.id.as_str(), "SIMBBBBBB");
                assert_eq!(result.status, PublishStatus::Uploaded);
                assert_eq!(result.published_at, at);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_simulated_id_shape() {
        let publisher = SimulatedPublisher::new(Duration::ZERO);
        let PublishOutcome::Published(result) = publisher.publish(&request()).await else {
            panic!("simulated backend must publish");
        };
        let id = result.id.as_str();
        assert!(id.starts_with(ID_PREFIX));
        assert_eq!(id.len(), ID_PREFIX.len() + ID_SUFFIX_LEN);
        assert!(id[ID_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_simulated_latency_is_applied() {
        let publisher = SimulatedPublisher::new(Duration::from_millis(30));
        let start = Instant::now();
        publisher.publish(&request()).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}

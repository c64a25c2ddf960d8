//! Publish request/result models.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::GeneratedContent;
use crate::media::MediaRef;

/// Identifier assigned to a published video by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishId(pub String);

impl PublishId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublishId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Status reported by the backend for a finished publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[default]
    Uploaded,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Uploaded => "uploaded",
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub id: PublishId,
    pub status: PublishStatus,
    /// Wall-clock time at completion
    pub published_at: DateTime<Utc>,
}

impl PublishResult {
    /// `published_at` as RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn published_at_rfc3339(&self) -> String {
        self.published_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Caller-supplied publish options, echoed back in the response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublishOptions {
    pub language: String,
    pub monetization: bool,
    /// Scheduled publish time exactly as the caller sent it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

/// Everything a backend needs to publish one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub media: MediaRef,
    pub content: GeneratedContent,
    pub options: PublishOptions,
    /// Stable across retries of the same request
    pub idempotency_key: Uuid,
}

impl PublishRequest {
    pub fn new(media: MediaRef, content: GeneratedContent, options: PublishOptions) -> Self {
        Self {
            media,
            content,
            options,
            idempotency_key: Uuid::new_v4(),
        }
    }
}

/// Why a backend could not publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishFailure {
    pub reason: String,
    /// Transient failures may be retried with the same idempotency key
    pub retryable: bool,
}

impl PublishFailure {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            retryable: true,
        }
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            retryable: false,
        }
    }
}

/// Outcome of a single backend attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(PublishResult),
    Failed(PublishFailure),
}

/// Lifecycle of one publish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    /// Accepted, no attempt made yet
    #[default]
    Pending,
    /// An attempt is in flight
    Uploading,
    Published,
    Failed,
}

impl PublishState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishState::Pending => "pending",
            PublishState::Uploading => "uploading",
            PublishState::Published => "published",
            PublishState::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, PublishState::Published | PublishState::Failed)
    }

    /// Whether moving to `next` is a legal transition.
    ///
    /// `Failed -> Uploading` is allowed for retries of transient failures.
    pub fn can_transition_to(&self, next: PublishState) -> bool {
        use PublishState::*;
        matches!(
            (self, next),
            (Pending, Uploading) | (Uploading, Published) | (Uploading, Failed) | (Failed, Uploading)
        )
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

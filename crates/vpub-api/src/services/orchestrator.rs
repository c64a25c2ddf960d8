//! Upload orchestration: validate media, synthesize SEO content, publish.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use vpub_models::{GeneratedContent, MediaRef, PublishId, PublishOptions, PublishStatus, UploadedFile};
use vpub_publisher::PublishPipeline;
use vpub_seo::{normalize_key, ContentSynthesizer, SynthesisRequest};

use crate::error::{ApiError, ApiResult};
use crate::metrics;

/// Returned when neither a file nor a URL was supplied.
pub const MISSING_MEDIA_MESSAGE: &str = "Video file or URL is required";

/// Decoded upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadSubmission {
    pub video: Option<UploadedFile>,
    pub video_url: Option<String>,
    pub category: String,
    pub language: String,
    pub monetization: bool,
    pub schedule_time: Option<String>,
}

/// Successful upload response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(flatten)]
    pub content: GeneratedContent,
    pub video_id: PublishId,
    pub status: PublishStatus,
    /// Echoed verbatim; `null` when the caller sent none
    pub scheduled_time: Option<String>,
    pub uploaded_at: String,
    pub monetization_enabled: bool,
    pub language: String,
}

/// Runs one upload through synthesis and the publish pipeline.
#[derive(Clone)]
pub struct UploadOrchestrator {
    synthesizer: Arc<ContentSynthesizer>,
    pipeline: Arc<PublishPipeline>,
}

impl UploadOrchestrator {
    pub fn new(synthesizer: Arc<ContentSynthesizer>, pipeline: Arc<PublishPipeline>) -> Self {
        Self {
            synthesizer,
            pipeline,
        }
    }

    pub fn synthesizer(&self) -> &ContentSynthesizer {
        &self.synthesizer
    }

    pub fn pipeline(&self) -> &PublishPipeline {
        &self.pipeline
    }

    /// Process an upload end to end.
    pub async fn process(&self, submission: UploadSubmission) -> ApiResult<UploadResponse> {
        let started = Instant::now();
        let UploadSubmission {
            video,
            video_url,
            category,
            language,
            monetization,
            schedule_time,
        } = submission;

        let media = match resolve_media(video, video_url) {
            Ok(media) => media,
            Err(e) => {
                metrics::record_upload("none", "invalid");
                return Err(e);
            }
        };
        let media_kind = media.kind();

        let content = self.synthesizer.synthesize_request(
            &SynthesisRequest::new(&category, &language).with_file_name(media.file_name()),
        );
        self.record_synthesis(&category);

        let options = PublishOptions {
            language,
            monetization,
            scheduled_time: schedule_time,
        };

        let result = match self
            .pipeline
            .publish(media, content.clone(), options.clone())
            .await
        {
            Ok(result) => result,
            Err(e) => {
                metrics::record_upload(media_kind, "failed");
                warn!(
                    category = %category,
                    media = media_kind,
                    retryable = e.is_retryable(),
                    attempts = e.attempts(),
                    "Upload failed during publish"
                );
                return Err(ApiError::from(e));
            }
        };

        metrics::record_upload(media_kind, "published");
        info!(
            video_id = %result.id,
            category = %category,
            media = media_kind,
            duration_ms = started.elapsed().as_millis() as u64,
            "Upload published"
        );

        Ok(UploadResponse {
            content,
            uploaded_at: result.published_at_rfc3339(),
            video_id: result.id,
            status: result.status,
            scheduled_time: options.scheduled_time,
            monetization_enabled: options.monetization,
            language: options.language,
        })
    }

    fn record_synthesis(&self, category: &str) {
        let catalog = self.synthesizer.catalog();
        let key = normalize_key(category);
        if catalog.contains(&key) {
            metrics::record_content_synthesized(&key, false);
        } else {
            metrics::record_content_synthesized(catalog.default_key(), true);
        }
    }
}

/// Pick the media to publish. A file wins over a URL; blank URLs and
/// empty unnamed files count as absent.
pub fn resolve_media(video: Option<UploadedFile>, video_url: Option<String>) -> ApiResult<MediaRef> {
    let video = video.filter(|f| f.size_bytes > 0 || has_name(f));
    if let Some(file) = video {
        return Ok(MediaRef::File(file));
    }

    match video_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        Some(url) => Ok(MediaRef::url(url)),
        None => Err(ApiError::validation(MISSING_MEDIA_MESSAGE)),
    }
}

fn has_name(file: &UploadedFile) -> bool {
    file.file_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty())
}

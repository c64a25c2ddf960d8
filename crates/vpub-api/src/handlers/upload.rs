//! Multipart upload handler.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use vpub_models::UploadedFile;

use crate::error::{ApiError, ApiResult};
use crate::services::{UploadResponse, UploadSubmission};
use crate::state::AppState;

const SPOOL_PREFIX: &str = "vpub-upload-";

/// Upload a video and publish it with generated SEO content.
///
/// Multipart fields: `video` (file), `videoUrl`, `category`, `language`,
/// `monetization` (`"true"` enables) and `scheduleTime`.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let form = UploadForm::read(multipart).await?;
    // The spool file must outlive publishing
    let (submission, _spool) = form.into_parts();

    let response = state.orchestrator.process(submission).await?;
    Ok(Json(response))
}

/// A file part spooled to a temp file that is removed on drop.
struct SpooledVideo {
    file: UploadedFile,
    spool: NamedTempFile,
}

#[derive(Default)]
struct UploadForm {
    video: Option<SpooledVideo>,
    submission: UploadSubmission,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "video" => form.video = spool_video(field).await?,
                "videoUrl" => {
                    form.submission.video_url = Some(field.text().await.map_err(multipart_error)?)
                }
                "category" => form.submission.category = field.text().await.map_err(multipart_error)?,
                "language" => form.submission.language = field.text().await.map_err(multipart_error)?,
                "monetization" => {
                    form.submission.monetization = field.text().await.map_err(multipart_error)? == "true"
                }
                "scheduleTime" => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.submission.schedule_time = (!value.is_empty()).then_some(value);
                }
                other => debug!(field = other, "Ignoring unknown upload field"),
            }
        }

        Ok(form)
    }

    fn into_parts(self) -> (UploadSubmission, Option<NamedTempFile>) {
        let mut submission = self.submission;
        match self.video {
            Some(video) => {
                submission.video = Some(video.file);
                (submission, Some(video.spool))
            }
            None => (submission, None),
        }
    }
}

/// Stream a file part to disk. Returns `None` for an empty part without a
/// filename, which browsers send when no file was chosen.
async fn spool_video(mut field: Field<'_>) -> ApiResult<Option<SpooledVideo>> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty());
    let content_type = field.content_type().map(str::to_string);

    let spool = tempfile::Builder::new().prefix(SPOOL_PREFIX).tempfile()?;
    let mut writer = tokio::fs::File::from_std(spool.reopen()?);
    let mut size_bytes = 0u64;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size_bytes += chunk.len() as u64;
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;

    if size_bytes == 0 && file_name.is_none() {
        return Ok(None);
    }

    debug!(
        file_name = ?file_name,
        size_bytes,
        path = %spool.path().display(),
        "Spooled upload"
    );

    Ok(Some(SpooledVideo {
        file: UploadedFile {
            path: spool.path().to_path_buf(),
            file_name,
            content_type,
            size_bytes,
        },
        spool,
    }))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
    }
}

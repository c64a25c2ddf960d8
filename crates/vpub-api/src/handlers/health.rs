//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Overall readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Ready,
    Degraded,
}

/// Outcome of one readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Ok,
    Error,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: Readiness,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub catalog: CheckStatus,
    pub publisher: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: CheckState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckStatus {
    fn new(status: CheckState, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }
}

/// Readiness check endpoint (readiness probe).
/// Reports the loaded catalog and the active publish backend.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let catalog = state.synthesizer.catalog();
    let catalog_check = if catalog.is_empty() {
        CheckStatus::new(CheckState::Error, "catalog has no categories")
    } else {
        CheckStatus::new(CheckState::Ok, format!("{} categories", catalog.len()))
    };
    let publisher_check = CheckStatus::new(CheckState::Ok, state.pipeline.backend_name());

    let all_ok = [&catalog_check, &publisher_check]
        .iter()
        .all(|c| c.status == CheckState::Ok);
    let response = ReadinessResponse {
        status: if all_ok { Readiness::Ready } else { Readiness::Degraded },
        checks: ReadinessChecks {
            catalog: catalog_check,
            publisher: publisher_check,
        },
    };

    if all_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

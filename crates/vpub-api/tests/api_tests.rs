//! API integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use vpub_api::{create_router, ApiConfig, AppState};
use vpub_models::{FixedClock, FixedIndex, PublishFailure, PublishOutcome, PublishRequest};
use vpub_publisher::{PublishBackend, PublishPipeline, RetryConfig, SimulatedPublisher};
use vpub_seo::{CategoryProfileCatalog, ContentSynthesizer};

const BOUNDARY: &str = "vpub-test-boundary";

/// Rejects every publish.
struct RejectingBackend;

#[async_trait]
impl PublishBackend for RejectingBackend {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    async fn publish(&self, _request: &PublishRequest) -> PublishOutcome {
        PublishOutcome::Failed(PublishFailure::permanent("platform quota exceeded"))
    }
}

/// Panics inside the handler stack.
struct PanickingBackend;

#[async_trait]
impl PublishBackend for PanickingBackend {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn publish(&self, _request: &PublishRequest) -> PublishOutcome {
        panic!("backend exploded")
    }
}

fn synthesizer() -> ContentSynthesizer {
    ContentSynthesizer::new(Arc::new(CategoryProfileCatalog::builtin()))
        .with_random(Arc::new(FixedIndex(0)))
        .with_clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        )))
}

fn router_with(config: ApiConfig, backend: Arc<dyn PublishBackend>) -> Router {
    let pipeline = PublishPipeline::new(backend);
    let state = AppState::from_parts(config, synthesizer(), pipeline);
    create_router(state, None)
}

fn create_test_router() -> Router {
    let publisher = SimulatedPublisher::new(Duration::ZERO).with_random(Arc::new(FixedIndex(2)));
    router_with(ApiConfig::default(), Arc::new(publisher))
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: video/mp4\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_catalog_and_backend() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["publisher"]["detail"], "simulated");
}

#[tokio::test]
async fn test_upload_without_media_is_rejected() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/upload",
            &[Part::Text("category", "gaming"), Part::Text("language", "en")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Video file or URL is required" })
    );
}

#[tokio::test]
async fn test_upload_blank_url_counts_as_missing() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/upload",
            &[Part::Text("videoUrl", "   "), Part::Text("category", "tech")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_music_file() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/upload",
            &[
                Part::File("video", "live-set.mp4", b"not really a video"),
                Part::Text("category", "music"),
                Part::Text("language", "en"),
                Part::Text("monetization", "true"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["hashtags"][0], "#music");
    let tags = body["tags"].as_array().unwrap();
    assert!(tags.iter().any(|t| t == "music"));
    assert!(tags.len() <= 15);
    assert!(body["hashtags"].as_array().unwrap().len() <= 10);
    assert!(body["title"].as_str().unwrap().chars().count() <= 70);

    assert_eq!(body["videoId"], "SIMCCCCCC");
    assert_eq!(body["status"], "uploaded");
    assert_eq!(body["monetizationEnabled"], true);
    assert_eq!(body["language"], "en");
    assert!(body["scheduledTime"].is_null());
    assert!(body["uploadedAt"].as_str().unwrap().ends_with('Z'));
    assert!(!body["thumbnailPrompt"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_echoes_schedule_time() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/upload",
            &[
                Part::Text("videoUrl", "https://cdn.example.com/clip.mp4"),
                Part::Text("category", "travel"),
                Part::Text("language", "fr"),
                Part::Text("monetization", "false"),
                Part::Text("scheduleTime", "2025-07-01T10:00"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["scheduledTime"], "2025-07-01T10:00");
    assert_eq!(body["monetizationEnabled"], false);
    assert_eq!(body["language"], "fr");
}

#[tokio::test]
async fn test_upload_under_api_prefix() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/api/upload",
            &[
                Part::Text("videoUrl", "https://cdn.example.com/clip.mp4"),
                Part::Text("category", "cooking"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_category_falls_back() {
    let response = create_test_router()
        .oneshot(upload_request(
            "/upload",
            &[
                Part::Text("videoUrl", "https://cdn.example.com/clip.mp4"),
                Part::Text("category", "underwater-basket-weaving"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let tags = body["tags"].as_array().unwrap();
    assert!(tags.iter().any(|t| t == "technology"));
}

#[tokio::test]
async fn test_publish_failure_is_generic_500() {
    let app = router_with(ApiConfig::default(), Arc::new(RejectingBackend));
    let response = app
        .oneshot(upload_request(
            "/upload",
            &[
                Part::Text("videoUrl", "https://cdn.example.com/clip.mp4"),
                Part::Text("category", "tech"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Failed to process upload" }));
}

#[tokio::test]
async fn test_publish_timeout_is_generic_500() {
    let backend = SimulatedPublisher::new(Duration::from_millis(200));
    let pipeline = PublishPipeline::new(Arc::new(backend)).with_config(
        vpub_publisher::PipelineConfig {
            attempt_timeout: Duration::from_millis(5),
            retry: RetryConfig::none(),
        },
    );
    let state = AppState::from_parts(ApiConfig::default(), synthesizer(), pipeline);
    let response = create_router(state, None)
        .oneshot(upload_request(
            "/upload",
            &[Part::Text("videoUrl", "https://cdn.example.com/clip.mp4")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "Failed to process upload");
}

#[tokio::test]
async fn test_backend_panic_is_generic_500() {
    let app = router_with(ApiConfig::default(), Arc::new(PanickingBackend));
    let response = app
        .oneshot(upload_request(
            "/upload",
            &[Part::Text("videoUrl", "https://cdn.example.com/clip.mp4")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Failed to process upload" })
    );
}

#[tokio::test]
async fn test_oversized_body_is_json_413() {
    let config = ApiConfig {
        max_body_size: 10,
        ..ApiConfig::default()
    };
    let app = router_with(config, Arc::new(SimulatedPublisher::new(Duration::ZERO)));

    let body = multipart_body(&[
        Part::Text("videoUrl", "https://cdn.example.com/clip.mp4"),
        Part::Text("category", "gaming"),
    ]);
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Request body too large" })
    );
}

#[tokio::test]
async fn test_request_timeout_is_generic_500() {
    let config = ApiConfig {
        request_timeout: Duration::from_millis(50),
        ..ApiConfig::default()
    };
    let backend = SimulatedPublisher::new(Duration::from_millis(300));
    let response = router_with(config, Arc::new(backend))
        .oneshot(upload_request(
            "/upload",
            &[Part::Text("videoUrl", "https://cdn.example.com/clip.mp4")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Failed to process upload" })
    );
}

#[tokio::test]
async fn test_malformed_multipart_is_bad_request() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_list_categories() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["default"], "tech");
    let keys: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["key"].as_str())
        .collect();
    assert!(keys.contains(&"music"));
    assert!(keys.contains(&"gaming"));
}

#[tokio::test]
async fn test_list_languages() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/api/languages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 10);
    assert_eq!(languages[0]["code"], "en");
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("X-Request-ID", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_rate_limiting() {
    let config = ApiConfig {
        rate_limit_rps: 1,
        rate_limit_burst: 2,
        ..ApiConfig::default()
    };
    let publisher = SimulatedPublisher::new(Duration::ZERO);
    let app = router_with(config, Arc::new(publisher));

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/categories")
                    .header("X-Forwarded-For", "192.168.1.100")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );
}

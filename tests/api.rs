use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use serde_json::Value;
use async_trait::async_trait;
use cityscan::agents::ClassifierClient;
use cityscan::api::{build_router, AppState};
use cityscan::errors::CityScanError;
use cityscan::llm::{LLMProvider, LLMResponse};
use cityscan::models::ImageInput;
use cityscan::pipeline::Orchestrator;
use cityscan::prompts::PromptSet;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const BOUNDARY: &str = "cityscan-test-boundary";

/// Model stand-in: fixed specialist replies, optional summary failure.
#[derive(Default)]
struct ScriptedModel {
    image_calls: AtomicUsize,
    fail_summary: bool,
    garbled_graffiti: bool,
}

#[async_trait]
impl LLMProvider for ScriptedModel {
    async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, CityScanError> {
        if self.fail_summary {
            return Err(CityScanError::Network("summary backend unreachable".into()));
        }
        Ok(LLMResponse::text("Trash is the main concern on this block.", "scripted"))
    }

    async fn complete_with_image(&self, prompt: &str, _image: &ImageInput) -> Result<LLMResponse, CityScanError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let reply = if prompt.contains("pothole detection") {
            r#"{"description": null, "severity_score": 0}"#
        } else if prompt.contains("trash detection") {
            "```json\n{\"description\": \"Illegal dumping by the fence\", \"severity_score\": 90}\n```"
        } else if self.garbled_graffiti {
            "Sorry, I cannot help with that."
        } else {
            r#"{"description": "Small tag on a mailbox", "severity_score": 10}"#
        };
        Ok(LLMResponse::text(reply, "scripted"))
    }

    fn provider_name(&self) -> &str { "scripted" }
    fn model_name(&self) -> &str { "scripted" }
}

struct TestServer {
    state: AppState,
    model: Arc<ScriptedModel>,
    upload_dir: tempfile::TempDir,
}

fn create_test_server(model: ScriptedModel) -> TestServer {
    let model = Arc::new(model);
    let upload_dir = tempfile::tempdir().unwrap();
    let prompts = Arc::new(PromptSet::default());
    let classifier = ClassifierClient::new(model.clone(), prompts.clone());
    let orchestrator = Orchestrator::new(classifier, model.clone(), prompts);

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    };
    TestServer { state, model, upload_dir }
}

fn app(server: &TestServer) -> axum::Router {
    build_router(server.state.clone())
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([90, 90, 90]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn multipart_request(field: &str, filename: &str, content: &[u8]) -> axum::http::Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    ).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    axum::http::Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

fn upload_dir_is_empty(server: &TestServer) -> bool {
    std::fs::read_dir(server.upload_dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(ScriptedModel::default());
    let req = axum::http::Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "cityscan");
}

#[tokio::test]
async fn test_analyze_png_returns_full_report() {
    let server = create_test_server(ScriptedModel::default());
    let req = multipart_request("image", "corner.png", &png_bytes());
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    for key in ["pothole", "trash", "graffiti", "cumulative_severity_score", "executive_summary"] {
        assert!(body.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(body["pothole"]["severity_score"], 0);
    assert!(body["pothole"]["description"].is_null());
    assert_eq!(body["trash"]["description"], "Illegal dumping by the fence");
    // round(0.5*0 + 0.3*90 + 0.2*10) = 29
    assert_eq!(body["cumulative_severity_score"], 29);
    assert_eq!(body["executive_summary"], "Trash is the main concern on this block.");

    assert_eq!(server.model.image_calls.load(Ordering::SeqCst), 3);
    assert!(upload_dir_is_empty(&server));
}

#[tokio::test]
async fn test_unparseable_specialist_isolated() {
    let server = create_test_server(ScriptedModel { garbled_graffiti: true, ..Default::default() });
    let req = multipart_request("image", "corner.PNG", &png_bytes());
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["graffiti"]["error"], "Failed to parse output from Graffiti");
    assert_eq!(body["trash"]["severity_score"], 90);
    assert_eq!(body["cumulative_severity_score"], 27);
}

#[tokio::test]
async fn test_analyze_txt_rejected() {
    let server = create_test_server(ScriptedModel::default());
    let req = multipart_request("image", "notes.txt", b"not an image");
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "File type not allowed");
    assert_eq!(server.model.image_calls.load(Ordering::SeqCst), 0);
    assert!(upload_dir_is_empty(&server));
}

#[tokio::test]
async fn test_analyze_missing_image_part() {
    let server = create_test_server(ScriptedModel::default());
    let req = multipart_request("photo", "corner.png", &png_bytes());
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "No image file part in the request");
}

#[tokio::test]
async fn test_analyze_empty_filename() {
    let server = create_test_server(ScriptedModel::default());
    let req = multipart_request("image", "", b"");
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "No selected image file");
}

#[tokio::test]
async fn test_analyze_non_multipart_body() {
    let server = create_test_server(ScriptedModel::default());
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "No image file part in the request");
}

#[tokio::test]
async fn test_undecodable_image_is_server_error() {
    let server = create_test_server(ScriptedModel::default());
    let req = multipart_request("image", "broken.jpg", b"definitely not a jpeg");
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Failed to load image at"));
    assert_eq!(server.model.image_calls.load(Ordering::SeqCst), 0);
    assert!(upload_dir_is_empty(&server));
}

#[tokio::test]
async fn test_summary_failure_is_bare_server_error() {
    let server = create_test_server(ScriptedModel { fail_summary: true, ..Default::default() });
    let req = multipart_request("image", "corner.gif", &png_bytes());
    let response = app(&server).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
    assert!(upload_dir_is_empty(&server));
}

//! Integration tests for the web adapter.
//!
//! The adapter is served on an ephemeral port with scripted backends and
//! exercised with a real HTTP client.

use async_trait::async_trait;
use marketplace_shell::adapters::web::{router, WebState};
use marketplace_shell::describe::{DescriptionGenerator, GENERATION_UNAVAILABLE};
use marketplace_shell::{AnalysisFailed, AnalysisRequest, AnalysisResponse, AnalysisTransport};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct ScriptedTransport {
    calls: AtomicUsize,
    last: Mutex<Option<AnalysisRequest>>,
    outcome: Result<AnalysisResponse, AnalysisFailed>,
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AnalysisFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        self.outcome.clone()
    }
}

struct OfflineDescriber;

#[async_trait]
impl DescriptionGenerator for OfflineDescriber {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate(&self, _title: &str, _author: &str, _hints: &str) -> anyhow::Result<String> {
        anyhow::bail!("no network")
    }
}

async fn spawn(transport: Arc<ScriptedTransport>) -> String {
    let state = WebState {
        transport,
        describer: Arc::new(OfflineDescriber),
    };
    let app = router(state, 1024 * 1024);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn scripted(outcome: Result<AnalysisResponse, AnalysisFailed>) -> Arc<ScriptedTransport> {
    Arc::new(ScriptedTransport {
        calls: AtomicUsize::new(0),
        last: Mutex::new(None),
        outcome,
    })
}

#[tokio::test]
async fn test_health() {
    let base = spawn(scripted(Ok(AnalysisResponse::default()))).await;
    let body = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_text_analysis_returns_view() {
    let transport = scripted(Ok(AnalysisResponse {
        summary: "ok".to_string(),
        key_insights: vec!["x".to_string()],
        confidence: Some(0.5),
        ..Default::default()
    }));
    let base = spawn(transport.clone()).await;

    let form = Form::new()
        .text("inputType", "text")
        .text("text", "Lisinopril 10mg once daily");
    let response = reqwest::Client::new()
        .post(format!("{}/analysis", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["state"], "success");
    assert_eq!(view["result"]["summary"]["confidence_percent"], 50);
    assert!(view["result"]["medications"].is_null());
    assert_eq!(view["result"]["insights"][0], "x");

    let last = transport.last.lock().unwrap().clone().unwrap();
    assert_eq!(last.text.as_deref(), Some("Lisinopril 10mg once daily"));
}

#[tokio::test]
async fn test_missing_file_is_unprocessable() {
    let transport = scripted(Ok(AnalysisResponse::default()));
    let base = spawn(transport.clone()).await;

    let form = Form::new().text("inputType", "pdf").text("text", "ignored");
    let response = reqwest::Client::new()
        .post(format!("{}/analysis", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["error"], "Please select a PDF file");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_file_mode_ignores_text_field() {
    let transport = scripted(Ok(AnalysisResponse::default()));
    let base = spawn(transport.clone()).await;

    let part = Part::bytes(vec![0xff, 0xd8, 0xff])
        .file_name("photo.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = Form::new()
        .text("inputType", "image")
        .text("text", "stale text")
        .part("file", part);
    let response = reqwest::Client::new()
        .post(format!("{}/analysis", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let last = transport.last.lock().unwrap().clone().unwrap();
    assert_eq!(last.text, None);
    let file = last.file.unwrap();
    assert_eq!(file.name, "photo.jpg");
    assert_eq!(file.mime_type, "image/jpeg");
    assert_eq!(file.size(), 3);
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let base = spawn(scripted(Err(AnalysisFailed::new("server exploded")))).await;

    let form = Form::new().text("inputType", "text").text("text", "notes");
    let response = reqwest::Client::new()
        .post(format!("{}/analysis", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["error"], "server exploded");
    assert_eq!(view["text"], "notes");
    assert!(view["result"].is_null());
}

#[tokio::test]
async fn test_unknown_input_type_is_bad_request() {
    let base = spawn(scripted(Ok(AnalysisResponse::default()))).await;

    let form = Form::new().text("inputType", "docx");
    let response = reqwest::Client::new()
        .post(format!("{}/analysis", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_describe_falls_back() {
    let base = spawn(scripted(Ok(AnalysisResponse::default()))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/describe", base))
        .json(&serde_json::json!({"title": "Dune", "author": "Frank Herbert"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["description"], GENERATION_UNAVAILABLE);
}

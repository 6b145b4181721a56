//! Transport to the analysis backend.
//!
//! Defines the [`AnalysisTransport`] trait so the analysis screen can be
//! driven by the HTTP client or by a fake in tests.

use crate::config::AppConfig;
use crate::error::AnalysisFailed;
use crate::schema::{AnalysisRequest, AnalysisResponse};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Performs exactly one request per submission. No retries.
#[async_trait::async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AnalysisFailed>;
}

/// Multipart HTTP client for `POST {base}/analyze`.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Client::new(), config.api_base_url.clone())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Probe `GET {base}/health`.
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Analysis service unhealthy ({}): {}", status, text);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AnalysisTransport for HttpAnalysisClient {
    async fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AnalysisFailed> {
        let input_type = request.input_type;
        let form = build_form(request)?;
        let url = self.endpoint();

        info!("Submitting {} analysis to {}", input_type, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Analysis request failed: {}", e);
                AnalysisFailed::new(format!("Could not reach analysis service: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read analysis response body: {}", e);
            AnalysisFailed::new(format!("Could not read analysis response: {}", e))
        })?;

        debug!("Analysis response: status={} ({} bytes)", status, body.len());

        map_response(status, &body)
    }
}

/// Encode the request as the multipart body the backend expects.
fn build_form(request: AnalysisRequest) -> Result<Form, AnalysisFailed> {
    let input_type = request.input_type;
    let mut form = Form::new();

    if let Some(text) = request.effective_text() {
        form = form.text("text", text.to_string());
    }

    if let Some(file) = request.effective_file() {
        let part = Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                AnalysisFailed::new(format!("Invalid file type {}: {}", file.mime_type, e))
            })?;
        form = form.part("file", part);
    }

    Ok(form.text("inputType", input_type.as_str()))
}

/// Map status + body to the result the screen sees.
///
/// Parse failures never escape as parse errors; they become [`AnalysisFailed`]
/// with a status-derived message.
pub fn map_response(status: StatusCode, body: &str) -> Result<AnalysisResponse, AnalysisFailed> {
    if status.is_success() {
        return serde_json::from_str::<AnalysisResponse>(body).map_err(|e| {
            warn!("Unparseable analysis response ({}): {}", status, e);
            AnalysisFailed::new(format!(
                "Analysis service returned an unreadable response (HTTP {})",
                status.as_u16()
            ))
        });
    }

    let message = error_message(body).unwrap_or_else(|| {
        format!("Analysis failed (HTTP {})", status.as_u16())
    });
    warn!("Analysis rejected ({}): {}", status, message);
    Err(AnalysisFailed::new(message))
}

/// Pull a human-readable message out of an error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

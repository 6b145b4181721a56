//! Book description generation.
//!
//! The generative backend sits behind [`DescriptionGenerator`]. Callers use
//! [`DescriptionGenerator::describe`], which never fails: any backend error
//! is logged and replaced with a fallback string so the form stays usable.
//! [`DescriptionGenerator::generate`] keeps the failure visible for callers
//! that want to offer a retry.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Returned when the backend answers with no text.
pub const GENERATION_FAILED: &str = "Description generation failed.";
/// Returned when the backend call fails outright.
pub const GENERATION_UNAVAILABLE: &str = "Could not generate description at this time.";

#[async_trait::async_trait]
pub trait DescriptionGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, title: &str, author: &str, hints: &str) -> Result<String>;

    async fn describe(&self, title: &str, author: &str, hints: &str) -> String {
        match self.generate(title, author, hints).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                debug!("{}: empty description for '{}'", self.name(), title);
                GENERATION_FAILED.to_string()
            }
            Err(e) => {
                error!("{}: description generation failed: {:#}", self.name(), e);
                GENERATION_UNAVAILABLE.to_string()
            }
        }
    }
}

pub fn synopsis_prompt(title: &str, author: &str, keywords: &str) -> String {
    format!(
        "Write a compelling, short synopsis (approx 100 words) for a book titled \"{}\" by \"{}\". \
         The book involves: {}. Make it sound exciting and professional.",
        title, author, keywords
    )
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate_content(&self, prompt: String) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("API Key not found (set GEMINI_API_KEY)")?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("Sending request to Gemini: model={}", self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: Some(prompt) }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                "Gemini response: {} tokens (prompt: {}, completion: {})",
                usage.total_token_count, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(response.text())
    }
}

#[async_trait::async_trait]
impl DescriptionGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, title: &str, author: &str, hints: &str) -> Result<String> {
        self.generate_content(synopsis_prompt(title, author, hints))
            .await
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

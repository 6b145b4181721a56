//! Web adapter: serves the analysis screen view-model as JSON.
//!
//! Each `POST /analysis` drives a fresh [`AnalysisScreen`] through one
//! submission, so browser clients see exactly what the terminal adapter sees.

use crate::config::AppConfig;
use crate::describe::DescriptionGenerator;
use crate::error::ScreenError;
use crate::schema::{guess_mime_type, InputType, SelectedFile};
use crate::screen::{AnalysisScreen, ScreenState, ScreenView};
use crate::transport::AnalysisTransport;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state for the web handlers.
#[derive(Clone)]
pub struct WebState {
    pub transport: Arc<dyn AnalysisTransport>,
    pub describer: Arc<dyn DescriptionGenerator>,
}

pub fn router(state: WebState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analysis", post(analyze))
        .route("/describe", post(describe))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process stops.
pub async fn serve(state: WebState, config: &AppConfig) -> anyhow::Result<()> {
    let app = router(state, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("Server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// Run one submission from multipart fields `inputType`, `text` and `file`.
async fn analyze(
    State(state): State<WebState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ScreenView>), (StatusCode, String)> {
    let mut input_type = None;
    let mut text = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "inputType" => {
                let value = field.text().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read inputType: {}", e))
                })?;
                let parsed = value
                    .parse::<InputType>()
                    .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
                input_type = Some(parsed);
            }
            "text" => {
                text = Some(field.text().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read text: {}", e))
                })?);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("document").to_string();
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime_type(&filename).to_string());
                let data = field.bytes().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
                })?;
                file = Some(SelectedFile::new(filename, mime_type, data.to_vec()));
            }
            other => debug!("Ignoring multipart field: {}", other),
        }
    }

    let mode = input_type.ok_or_else(|| {
        (StatusCode::BAD_REQUEST, "Missing inputType field".to_string())
    })?;

    let mut screen = AnalysisScreen::new();
    screen.set_mode(mode);
    // Content for the other modes is ignored, as it would be in the app.
    if mode == InputType::Text {
        if let Some(text) = text {
            screen
                .set_text(text)
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        }
    } else if let Some(file) = file {
        screen
            .select_file(file)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    }

    let status = match screen.submit(state.transport.as_ref()).await {
        ScreenState::Failed => match screen.error() {
            Some(ScreenError::Analysis(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        },
        _ => StatusCode::OK,
    };

    Ok((status, Json(screen.view())))
}

#[derive(Debug, Deserialize)]
struct DescribeRequest {
    title: String,
    author: String,
    #[serde(default)]
    keywords: String,
}

#[derive(Debug, Serialize)]
struct DescribeResponse {
    description: String,
}

async fn describe(
    State(state): State<WebState>,
    Json(request): Json<DescribeRequest>,
) -> Json<DescribeResponse> {
    let description = state
        .describer
        .describe(&request.title, &request.author, &request.keywords)
        .await;
    Json(DescribeResponse { description })
}

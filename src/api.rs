use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection, rejection::BytesRejection, DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::handlers::{AnalysisError, AnalysisHandler};
use crate::models::{AnalysisRequest, AnalysisResult, FallbackResponse};

pub mod upload;

use upload::{read_label_image, InputError};

pub struct AppState {
    pub analysis_handler: AnalysisHandler,
    pub expose_raw_response: bool,
}

#[derive(Debug, Deserialize)]
struct TextAnalysisPayload {
    #[serde(default)]
    text: Option<String>,
}

pub fn create_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_image_handler))
        .route("/analyze-text", post(analyze_text_handler))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

async fn analyze_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, InputError> {
    log::info!("📥 Incoming /analyze request");

    let image = read_label_image(multipart?).await?;
    log::info!("🖼️ Image received: {} {} bytes", image.mime_type, image.bytes.len());

    let outcome = state
        .analysis_handler
        .analyze(AnalysisRequest::Image {
            bytes: image.bytes,
            mime_type: image.mime_type,
        })
        .await;

    Ok(analysis_response(&state, outcome))
}

async fn analyze_text_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, InputError> {
    let body = body?;
    log::info!("📥 Incoming /analyze-text request ({} bytes)", body.len());

    let payload: TextAnalysisPayload =
        serde_json::from_slice(&body).map_err(|e| InputError::MalformedBody(e.to_string()))?;

    let text = payload
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(InputError::NoText)?;

    let outcome = state
        .analysis_handler
        .analyze(AnalysisRequest::Text { text })
        .await;

    Ok(analysis_response(&state, outcome))
}

/// 200 with the result, or 500 with the fallback so the client always has something to render.
fn analysis_response(state: &AppState, outcome: Result<AnalysisResult, AnalysisError>) -> Response {
    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            log::error!("🔥 Analysis failed [{}]: {}", err.category(), err);
            log::error!("🔥 Error detail: {:?}", err);
            if let Some(raw) = err.raw_response() {
                log::error!("🔥 Raw AI response:\n{}", raw);
            }

            let body = FallbackResponse {
                result: err.fallback(),
                raw_response: err
                    .raw_response()
                    .filter(|_| state.expose_raw_response)
                    .map(str::to_string),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn root_handler() -> &'static str {
    "NutriSight analysis gateway - POST /analyze (multipart 'label') or /analyze-text ({\"text\": ...})"
}

async fn health_check() -> &'static str {
    "OK"
}

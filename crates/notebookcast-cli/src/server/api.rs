use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use notebookcast::{Pipeline, PipelineError, PodcastRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub audio_path: Option<String>,
    pub transcript: Option<String>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/generate_podcast", post(generate_podcast))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    log::debug!("Health check endpoint called");
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

async fn generate_podcast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PodcastRequest>,
) -> Response {
    let start = Instant::now();
    log::info!(
        "Generating podcast: {} file(s), url={:?}, language={}",
        request.files.len(),
        request.url,
        request.language
    );

    match state.pipeline.run(request).await {
        Ok(output) => {
            let duration = start.elapsed();
            log::info!("Podcast generated in {:.2}s", duration.as_secs_f64());
            Json(GenerateResponse {
                success: true,
                audio_path: Some(output.audio_path.display().to_string()),
                transcript: Some(output.transcript),
                error: None,
                execution_time_ms: Some(duration.as_millis() as u64),
            })
            .into_response()
        }
        Err(e) => {
            let duration = start.elapsed();
            log::error!(
                "Podcast generation failed after {:.2}s: {}",
                duration.as_secs_f64(),
                e
            );
            let body = Json(GenerateResponse {
                success: false,
                audio_path: None,
                transcript: None,
                error: Some(e.to_string()),
                execution_time_ms: Some(duration.as_millis() as u64),
            });
            (status_for(&e), body).into_response()
        }
    }
}

/// Caller mistakes are 400s, missing tooling 503, the rest 500.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::NoInputProvided
        | PipelineError::NotPdf(_)
        | PipelineError::UnsupportedLanguage(_)
        | PipelineError::ContentTooLong { .. }
        | PipelineError::UnknownLength(_)
        | PipelineError::InvalidVoiceSeed { .. } => StatusCode::BAD_REQUEST,
        PipelineError::DependencyMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::UrlFetch(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(response) = health().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&PipelineError::NoInputProvided),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&PipelineError::ContentTooLong {
                limit: 100_000,
                actual: 100_001
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&PipelineError::InvalidVoiceSeed {
                seed: u32::MAX,
                max: 8
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&PipelineError::DependencyMissing("ffmpeg".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&PipelineError::Export("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_body_shape() {
        let body = GenerateResponse {
            success: false,
            audio_path: None,
            transcript: None,
            error: Some("Please provide at least one PDF file or a URL.".to_string()),
            execution_time_ms: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["audio_path"].is_null());
        assert!(json.get("execution_time_ms").is_none());
    }
}

//! HTTP surface: router, CORS, and the two endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::domain::submission::{SubmissionForm, SubmissionResponse};
use crate::error::SubmitError;
use crate::service::SubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SubmissionService>,
}

/// Build the application router with CORS and request tracing.
pub fn router(config: &AppConfig, service: Arc<SubmissionService>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/submit-form", post(submit_form))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(AppState { service })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let list: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(list))
    }
}

/// Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "message": "Backend is running!"}))
}

/// Accept one contact-form submission.
async fn submit_form(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> Result<Json<SubmissionResponse>, SubmitError> {
    let response = state.service.handle(form).await?;
    Ok(Json(response))
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            SubmitError::Validation(_) | SubmitError::Verification(_) => StatusCode::BAD_REQUEST,
            // Storage errors are absorbed inside the service; this arm
            // keeps the mapping total.
            SubmitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({"detail": self.to_string()}))).into_response()
    }
}

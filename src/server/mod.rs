//! server
//!
//! HTTP layer: routing, request parsing, and error-to-status mapping.
//!
//! # Endpoints
//!
//! - `POST /api/submit` — accept a submission, commit it, report the result
//! - `GET /health` — liveness probe
//!
//! # Error Shape
//!
//! Error responses carry `{ "detail": "..." }` with the status encoding the
//! kind: 400 for invalid input, 409 for a path collision, 500 for
//! configuration faults and hosting-service failures. Success responses are
//! `{ "success": true, "file_path", "commit_sha", "message" }`.
//!
//! The submission UI is served from another origin, so the router carries a
//! permissive CORS layer.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::core::types::{SubmissionOutcome, SubmissionRequest};
use crate::forge::github::GitHubForge;
use crate::forge::Forge;
use crate::submit::{SubmissionHandler, SubmitError};

/// Shared server state: the handler, fixed at startup.
pub struct AppState {
    handler: SubmissionHandler,
}

impl AppState {
    /// Build state over an explicit forge (tests pass a mock here).
    pub fn new(config: ServiceConfig, forge: Arc<dyn Forge>) -> Self {
        Self {
            handler: SubmissionHandler::new(config, forge),
        }
    }

    /// Build state with the production GitHub forge derived from config.
    pub fn from_config(config: ServiceConfig) -> Self {
        let forge: Arc<dyn Forge> = match &config.api_base {
            Some(api_base) => Arc::new(GitHubForge::with_api_base(
                config.github_token.clone(),
                &config.repo_owner,
                &config.repo_name,
                api_base,
            )),
            None => Arc::new(GitHubForge::new(
                config.github_token.clone(),
                &config.repo_owner,
                &config.repo_name,
            )),
        };
        Self::new(config, forge)
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/submit", post(submit))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Success response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub file_path: String,
    pub commit_sha: String,
    pub message: String,
}

impl From<SubmissionOutcome> for SubmitResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: true,
            file_path: outcome.file_path,
            commit_sha: outcome.commit_sha,
            message: outcome.message,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match &self {
            SubmitError::Config => StatusCode::INTERNAL_SERVER_ERROR,
            SubmitError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SubmitError::Conflict { .. } => StatusCode::CONFLICT,
            SubmitError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

/// `POST /api/submit` handler.
///
/// The body is parsed manually from JSON so that schema violations (an
/// unknown category, a missing field) come back as a 400 with a `detail`
/// message, matching the rest of the error surface.
async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SubmitResponse>, SubmitError> {
    let request: SubmissionRequest = serde_json::from_value(body)
        .map_err(|e| SubmitError::InvalidInput(format!("Invalid submission: {}", e)))?;

    info!(title = %request.title, category = %request.category, "submission received");

    let outcome = state.handler.submit(request).await?;
    Ok(Json(outcome.into()))
}

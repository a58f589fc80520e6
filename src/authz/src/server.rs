//! HTTP check service
//!
//! ## Endpoints
//!
//! - `POST /v1/check` - Evaluate a guard for an optional principal
//! - `GET /v1/roles` - Role table in force
//! - `GET /health` - Health check

use crate::error::AuthzError;
use crate::guard::{GuardDecision, PageGuard};
use crate::roles::RoleTable;
use crate::session::{SessionClaims, SessionResolver};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    sessions: SessionResolver,
    start_time: Instant,
}

impl AppState {
    pub fn new(roles: Arc<RoleTable>) -> Self {
        Self {
            sessions: SessionResolver::new(roles),
            start_time: Instant::now(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::UnknownRole(role) => (StatusCode::UNPROCESSABLE_ENTITY, "unknown_role", role),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::InvalidInput(msg) => AppError::BadRequest(msg),
            AuthzError::UnknownRole(role) => AppError::UnknownRole(role),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// A single scope or a list of scopes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequiredScopes {
    One(String),
    All(Vec<String>),
}

impl RequiredScopes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(scope) => vec![scope],
            Self::All(scopes) => scopes,
        }
    }
}

/// Guard check request
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Session claims; `null` or absent for unauthenticated requests
    #[serde(default)]
    pub principal: Option<SessionClaims>,

    pub required: RequiredScopes,

    /// Page or action being guarded
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    "api".to_string()
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    uptime_seconds: u64,
    version: String,
}

/// POST /v1/check - Evaluate a guard
async fn check(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<GuardDecision>, AppError> {
    let Json(req) = payload?;

    let principal = match &req.principal {
        Some(claims) => Some(state.sessions.resolve(claims).map_err(|e| {
            warn!("Rejected check for target {}: {}", req.target, e);
            AppError::from(e)
        })?),
        None => None,
    };

    let guard = PageGuard::new(req.target, req.required.into_vec());
    let decision = guard.check(principal.as_ref());

    info!(
        "Guard decision: {} (target: {})",
        if decision.allowed { "ALLOW" } else { "FORBIDDEN" },
        decision.target
    );

    Ok(Json(decision))
}

/// GET /v1/roles - Role table in force
async fn roles(State(state): State<AppState>) -> Json<RoleTable> {
    Json(state.sessions.role_table().clone())
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: crate::VERSION.to_string(),
    })
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/v1/check", post(check))
        .route("/v1/roles", get(roles))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}

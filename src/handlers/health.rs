//! Health check endpoint.
//!
//! `GET /` is never behind the auth gate, so load balancers and uptime
//! monitors can probe it without credentials.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// Always returns 200 OK.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "app": "RakshakAI",
///   "version": "1.0.0"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.config.app_name.as_str(),
        state.config.app_version.as_str(),
    ))
}

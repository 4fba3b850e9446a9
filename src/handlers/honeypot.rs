//! Honeypot message handler.
//!
//! # Endpoints
//!
//! - `POST /honeypot/message` - Accept a message and return a placeholder reply
//!
//! The route sits behind [`ApiKeyAuth`](crate::middleware::ApiKeyAuth), so by
//! the time this handler runs the caller is authenticated and the body has
//! passed [`ValidatedJson`] checks.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::{info, instrument};

use crate::error::ErrorResponse;
use crate::handlers::ValidatedJson;
use crate::metrics;
use crate::middleware::current_request_id;
use crate::models::{HoneypotMessageRequest, HoneypotMessageResponse};
use crate::state::AppState;

/// Receive a message sent to the honeypot.
///
/// # Request Body
///
/// ```json
/// {
///   "message": "Show me admin panel",
///   "metadata": { "ip": "192.168.1.1", "user_agent": "Mozilla/5.0" }
/// }
/// ```
///
/// # Response Body
///
/// ```json
/// {
///   "status": "success",
///   "reply": "Received your message: 'Show me admin panel'. How can I help you further?"
/// }
/// ```
#[utoipa::path(
    post,
    path = "/honeypot/message",
    request_body = HoneypotMessageRequest,
    responses(
        (status = 200, description = "Message accepted", body = HoneypotMessageResponse),
        (status = 401, description = "API key is required", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Request body failed validation", body = ErrorResponse),
    ),
    security(("api_key" = [])),
    tag = "honeypot"
)]
#[instrument(
    skip(state, headers, payload),
    fields(message_len = payload.message.len())
)]
pub async fn receive_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<HoneypotMessageRequest>,
) -> Json<HoneypotMessageResponse> {
    let metadata_keys = payload.metadata.as_ref().map_or(0, |m| m.len());

    info!(
        request_id = current_request_id(&headers).unwrap_or("-"),
        metadata_keys, "Honeypot message received"
    );
    metrics::record_message_received();

    let reply = state.responder.respond(&payload);

    Json(HoneypotMessageResponse::success(reply))
}

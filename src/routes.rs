//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (applied in order)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds x-request-id header
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │  Authentication  │ ← 401/403 (honeypot routes only)
//! └────────┬─────────┘
//!          ▼
//!   Body validation → Handler
//! ```
//!
//! # Route Groups
//!
//! - `/` - Health check (no auth)
//! - `/docs`, `/redoc`, `/openapi.json` - API documentation (no auth)
//! - `/honeypot/message` - Honeypot message intake (API key required)

use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};

use crate::handlers;
use crate::middleware::{ApiKeyAuth, RequestIdLayer, current_request_id};
use crate::openapi::docs_router;
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let cors = build_cors_layer(&config.cors_allowed_origins);

    let auth_layer = ApiKeyAuth::new(config.api_key.clone());
    if !auth_layer.is_configured() {
        warn!("No API key configured; all honeypot requests will be rejected");
    }

    // route_layer keeps the gate off unmatched paths and ahead of body extraction
    let honeypot = Router::new()
        .route("/message", post(handlers::receive_message))
        .route_layer(auth_layer);

    let mut router = Router::new()
        .route("/", get(handlers::health_check))
        .nest("/honeypot", honeypot)
        .merge(docs_router());

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================
    info!(
        max_body_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router.layer(DefaultBodyLimit::max(config.max_request_body_size));
    router = router.layer(cors);
    router = router.layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        info_span!(
            "http_request",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = current_request_id(req.headers()).unwrap_or("-")
        )
    }));
    router = router.layer(RequestIdLayer::new());

    router.with_state(state)
}

/// Build CORS layer from configuration.
///
/// `*` allows any origin. Credentials are never allowed alongside a
/// wildcard origin.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

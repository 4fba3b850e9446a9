//! # RakshakAI Honeypot Gateway
//!
//! The HTTP boundary of an agentic honeypot, built with Axum:
//!
//! - **Health**: unauthenticated `GET /` for monitors
//! - **Security**: API key gate with constant-time comparison (401 missing, 403 invalid)
//! - **Validation**: explicit request body validation (422 on failure)
//! - **Observability**: request IDs, structured logging, optional Prometheus metrics
//! - **Docs**: OpenAPI document with Swagger UI (`/docs`) and ReDoc (`/redoc`)
//!
//! Reply generation sits behind the [`Responder`](services::Responder) trait.
//! The bundled [`EchoResponder`](services::EchoResponder) acknowledges each
//! message with a fixed template; no analysis is performed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Request ID → Trace → CORS → Auth)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Extractors (ValidatedJson → Validate)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (health, honeypot)                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Services (Responder)                                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rakshak_honeypot::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!
//!     let app = build_router(AppState::new(config));
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;

//! HTTP middleware for authentication and request correlation.
//!
//! - **API Key Authentication**: Constant-time comparison, 401 vs 403
//! - **Request ID**: Generation and propagation of `x-request-id`
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → Trace → CORS → Auth (honeypot routes only) → Handler
//!               ↓                          ↓
//!        x-request-id header        401 missing / 403 invalid
//! ```

pub mod auth;
pub mod request_id;

pub use auth::{API_KEY_HEADER, ApiKeyAuth, AuthenticatedKey, verify_api_key};
pub use request_id::{REQUEST_ID_HEADER, RequestIdLayer, current_request_id};

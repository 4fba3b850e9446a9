//! API key authentication middleware.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Distinct failures**: A missing key is `401`, a wrong key is `403`
//! - **Route-scoped**: Composed with `route_layer`, so it only guards the
//!   routes it wraps and always runs before body extraction
//!
//! # Usage
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! curl -X POST -H "x-api-key: your-secret-key" -H "Content-Type: application/json" \
//!      -d '{"message":"hello"}' http://localhost:8000/honeypot/message
//! ```
//!
//! # Empty Configured Key
//!
//! When no key is configured the gate fails closed: an empty header value is
//! treated as missing (`401`) and any other value can never match (`403`).

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::metrics::{self, reasons};

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Detail returned when the header is absent or empty.
pub const MISSING_KEY_DETAIL: &str = "API key is required";

/// Detail returned when the header does not match the configured key.
pub const INVALID_KEY_DETAIL: &str = "Invalid API key";

/// Marker inserted into request extensions once the API key has been accepted.
#[derive(Debug, Clone)]
pub struct AuthenticatedKey(Arc<str>);

impl AuthenticatedKey {
    /// The key value that was accepted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// API key authentication layer.
///
/// Every request passing through the layer must carry an `x-api-key` header
/// equal to the configured key. There is no disabled mode.
#[derive(Clone)]
pub struct ApiKeyAuth {
    expected_key: Arc<str>,
}

impl ApiKeyAuth {
    /// Create a new API key auth layer expecting `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            expected_key: Arc::from(api_key.into()),
        }
    }

    /// Whether a non-empty key is configured.
    ///
    /// With an empty key every request is rejected.
    pub fn is_configured(&self) -> bool {
        !self.expected_key.is_empty()
    }
}

impl<S> Layer<S> for ApiKeyAuth {
    type Service = ApiKeyAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuthService {
            inner,
            expected_key: self.expected_key.clone(),
        }
    }
}

/// API key authentication service wrapper.
#[derive(Clone)]
pub struct ApiKeyAuthService<S> {
    inner: S,
    expected_key: Arc<str>,
}

impl<S> Service<Request<Body>> for ApiKeyAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let expected_key = self.expected_key.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match verify_api_key(req.headers(), &expected_key) {
                Ok(()) => {
                    debug!(path = %req.uri().path(), "API key authentication successful");
                    req.extensions_mut().insert(AuthenticatedKey(expected_key));
                    inner.call(req).await
                }
                Err(err) => {
                    let reason = match err {
                        AppError::Unauthorized(_) => reasons::MISSING,
                        _ => reasons::INVALID,
                    };
                    metrics::record_auth_rejection(reason);
                    warn!(
                        path = %req.uri().path(),
                        method = %req.method(),
                        reason,
                        "API key rejected"
                    );
                    Ok(err.into_response())
                }
            }
        })
    }
}

/// Check the `x-api-key` header against `expected`.
///
/// # Errors
///
/// - `AppError::Unauthorized` when the header is absent or empty
/// - `AppError::Forbidden` when it does not match exactly
pub fn verify_api_key(headers: &HeaderMap, expected: &str) -> AppResult<()> {
    let provided = match headers.get(API_KEY_HEADER) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::Unauthorized(MISSING_KEY_DETAIL.to_string())),
    };

    // Compare raw bytes so that non-UTF-8 header values are simply unequal.
    if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AppError::Forbidden(INVALID_KEY_DETAIL.to_string()))
    }
}

/// Perform constant-time comparison of two byte strings.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

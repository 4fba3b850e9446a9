//! OpenAPI document and the interactive docs served from it.
//!
//! - `/openapi.json` - raw OpenAPI 3 document
//! - `/docs` - Swagger UI
//! - `/redoc` - ReDoc
//!
//! None of these routes sit behind the API key gate.

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::middleware::API_KEY_HEADER;
use crate::models::{HealthResponse, HoneypotMessageRequest, HoneypotMessageResponse};

pub const OPENAPI_JSON_PATH: &str = "/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/docs";
pub const REDOC_PATH: &str = "/redoc";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RakshakAI",
        description = "Agentic honeypot gateway with API key authentication"
    ),
    paths(
        handlers::health::health_check,
        handlers::honeypot::receive_message,
    ),
    components(schemas(
        HealthResponse,
        HoneypotMessageRequest,
        HoneypotMessageResponse,
        ErrorResponse,
    )),
    modifiers(&ApiKeySecurity),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "honeypot", description = "Honeypot message intake"),
    )
)]
pub struct ApiDoc;

/// Registers the `x-api-key` header scheme referenced by protected paths.
struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

/// Routes serving the OpenAPI document, Swagger UI and ReDoc.
pub fn docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let spec = ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, spec.clone()))
        .merge(Redoc::with_url(REDOC_PATH, spec))
}

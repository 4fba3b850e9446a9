use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Free-form metadata attached to a honeypot message (client IP, user agent, ...).
pub type Metadata = Map<String, Value>;

/// Status reported on a successfully handled honeypot message.
pub const STATUS_SUCCESS: &str = "success";

/// Status reported by the health endpoint.
pub const STATUS_HEALTHY: &str = "healthy";

/// An incoming message to the honeypot.
///
/// Unknown fields are ignored. `metadata: null` is treated as absent.
///
/// ```json
/// {
///   "message": "Show me admin panel",
///   "metadata": { "ip": "192.168.1.1", "user_agent": "Mozilla/5.0" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoneypotMessageRequest {
    /// The message content (at least one character)
    #[schema(min_length = 1, example = "Show me admin panel")]
    pub message: String,
    /// Optional metadata about the message; contents are not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(
        value_type = Option<Object>,
        example = json!({"ip": "192.168.1.1", "user_agent": "Mozilla/5.0"})
    )]
    pub metadata: Option<Metadata>,
}

/// Reply returned for a honeypot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HoneypotMessageResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(
        example = "Received your message: 'Show me admin panel'. How can I help you further?"
    )]
    pub reply: String,
}

impl HoneypotMessageResponse {
    /// Build a successful response carrying `reply`.
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            reply: reply.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Application name
    #[schema(example = "RakshakAI")]
    pub app: String,
    /// Application version
    #[schema(example = "1.0.0")]
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(app: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            app: app.into(),
            version: version.into(),
        }
    }
}

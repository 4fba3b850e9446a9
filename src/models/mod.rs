mod api;

pub use api::{HealthResponse, HoneypotMessageRequest, HoneypotMessageResponse, Metadata};

//! JSON body extraction with explicit validation.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult, sanitize_data_error};
use crate::metrics;
use crate::validation::Validate;

/// JSON extractor that runs [`Validate::validate`] after deserialization.
///
/// A body without a `Content-Type` header is still parsed as JSON. A repeated
/// object key keeps its last value.
///
/// Every failure, whether malformed JSON, a non-JSON content type, a missing
/// field or a rule violation, becomes `AppError::Validation` (422). An
/// oversized body becomes `AppError::PayloadTooLarge` (413).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let result = parse_json_body::<T, S>(req, state)
            .await
            .and_then(|value| value.validate().map(|()| value));

        result.map(ValidatedJson).inspect_err(|e| {
            if matches!(e, AppError::Validation(_)) {
                metrics::record_validation_rejection();
            }
        })
    }
}

async fn parse_json_body<T, S>(req: Request, state: &S) -> AppResult<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    if !is_json_or_unset(req.headers()) {
        return Err(AppError::Validation(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(JsonRejection::from)?;

    // Going through Value first lets duplicate keys collapse to the last one.
    let Json(value) = Json::<Value>::from_bytes(&bytes)?;

    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(sanitize_data_error(&e.to_string())))
}

/// `application/json`, any `application/*+json`, or no content type at all.
fn is_json_or_unset(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use axum::body::Body;
    use axum::http::HeaderValue;

    use super::*;
    use crate::models::HoneypotMessageRequest;

    async fn extract(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<HoneypotMessageRequest, AppError> {
        let mut builder = Request::post("/honeypot/message");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();

        ValidatedJson::<HoneypotMessageRequest>::from_request(req, &())
            .await
            .map(|ValidatedJson(v)| v)
    }

    #[tokio::test]
    async fn test_missing_content_type_is_parsed_as_json() {
        let request = extract(None, r#"{"message": "Show me admin panel"}"#)
            .await
            .unwrap();
        assert_eq!(request.message, "Show me admin panel");
    }

    #[tokio::test]
    async fn test_form_content_type_is_rejected() {
        let err = extract(
            Some("application/x-www-form-urlencoded"),
            r#"{"message": "hi"}"#,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_json_content_type_with_charset() {
        let request = extract(Some("application/json; charset=utf-8"), r#"{"message": "hi"}"#)
            .await
            .unwrap();
        assert_eq!(request.message, "hi");
    }

    #[tokio::test]
    async fn test_duplicate_key_keeps_last_value() {
        let request = extract(Some("application/json"), r#"{"message": "a", "message": "b"}"#)
            .await
            .unwrap();
        assert_eq!(request.message, "b");
    }

    #[tokio::test]
    async fn test_missing_field_detail() {
        let err = extract(Some("application/json"), "{}").await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: message");
    }

    #[tokio::test]
    async fn test_wrong_type_detail() {
        let err = extract(Some("application/json"), r#"{"message": 5}"#)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid data type in request body");
    }

    #[tokio::test]
    async fn test_malformed_json_without_content_type() {
        let err = extract(None, r#"{"message": "#).await.unwrap_err();
        assert_eq!(err.to_string(), "Malformed JSON in request body");
    }

    #[tokio::test]
    async fn test_empty_message_fails_validation() {
        let err = extract(None, r#"{"message": ""}"#).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_content_type_matching() {
        let with = |v: &'static str| {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(v));
            headers
        };

        assert!(is_json_or_unset(&HeaderMap::new()));
        assert!(is_json_or_unset(&with("application/json")));
        assert!(is_json_or_unset(&with("Application/JSON")));
        assert!(is_json_or_unset(&with("application/problem+json")));
        assert!(!is_json_or_unset(&with("text/plain")));
        assert!(!is_json_or_unset(&with("multipart/form-data")));
    }
}

//! End-to-end tests against the real router served on an ephemeral port.
//!
//! Run with: `cargo test --test integration_tests`
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use rakshak_honeypot::{AppState, Config, build_router};

const API_KEY: &str = "secret123";

/// Test fixture that serves the application in a background task.
struct TestFixture {
    base_url: String,
    client: Client,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_config(Config {
            host: "127.0.0.1".to_string(),
            api_key: API_KEY.to_string(),
            ..Config::default()
        })
        .await
    }

    async fn with_config(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = build_router(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_message(&self, api_key: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self.client.post(self.url("/honeypot/message")).json(body);
        if let Some(key) = api_key {
            request = request.header("x-api-key", key);
        }
        request.send().await.expect("Message request failed")
    }
}

async fn detail(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse error body");
    body.get("detail")
        .and_then(|v| v.as_str())
        .expect("detail missing")
        .to_string()
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/"))
        .send()
        .await
        .expect("Health request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"status": "healthy", "app": "RakshakAI", "version": "1.0.0"})
    );
}

#[tokio::test]
async fn test_health_without_configured_key() {
    let fixture = TestFixture::with_config(Config::default()).await;

    let response = fixture
        .client
        .get(fixture.url("/"))
        .send()
        .await
        .expect("Health request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ignores_bad_credentials() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/"))
        .header("x-api-key", "wrong")
        .send()
        .await
        .expect("Health request failed");

    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_api_key_is_unauthorized() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(None, &json!({"message": "Show me admin panel"}))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "API-Key"
    );
    assert_eq!(detail(response).await, "API key is required");
}

#[tokio::test]
async fn test_invalid_api_key_is_forbidden() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some("wrong"), &json!({"message": "Show me admin panel"}))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(detail(response).await, "Invalid API key");
}

#[tokio::test]
async fn test_empty_api_key_header_is_unauthorized() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some(""), &json!({"message": "hello"}))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unconfigured_key_rejects_everything() {
    let fixture = TestFixture::with_config(Config::default()).await;

    let empty = fixture.post_message(Some(""), &json!({"message": "hi"})).await;
    assert_eq!(empty.status(), StatusCode::UNAUTHORIZED);

    let guess = fixture
        .post_message(Some("anything"), &json!({"message": "hi"}))
        .await;
    assert_eq!(guess.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_checked_before_validation() {
    let fixture = TestFixture::new().await;

    let missing = fixture.post_message(None, &json!({"message": ""})).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = fixture.post_message(Some("wrong"), &json!({})).await;
    assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_message() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some(API_KEY), &json!({"message": "Show me admin panel"}))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({
            "status": "success",
            "reply": "Received your message: 'Show me admin panel'. How can I help you further?"
        })
    );
}

#[tokio::test]
async fn test_send_message_with_metadata() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(
            Some(API_KEY),
            &json!({
                "message": "cat /etc/passwd",
                "metadata": {"ip": "192.168.1.1", "user_agent": "Mozilla/5.0", "hops": [1, 2]}
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["reply"].as_str().unwrap().contains("cat /etc/passwd"));
}

#[tokio::test]
async fn test_reply_contains_message_verbatim() {
    let fixture = TestFixture::new().await;
    let message = "' OR 1=1; -- \"quoted\" <b>bold</b> ünïcødé";

    let response = fixture
        .post_message(Some(API_KEY), &json!({"message": message}))
        .await;

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["reply"].as_str().unwrap().contains(message));
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let fixture = TestFixture::new().await;
    let payload = json!({"message": "whoami"});

    let first = fixture
        .post_message(Some(API_KEY), &payload)
        .await
        .bytes()
        .await
        .unwrap();
    let second = fixture
        .post_message(Some(API_KEY), &payload)
        .await
        .bytes()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .header("x-request-id", "trace-42")
        .json(&json!({"message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-42");
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_empty_message_is_validation_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some(API_KEY), &json!({"message": ""}))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_missing_message_is_validation_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some(API_KEY), &json!({"metadata": {"ip": "1.2.3.4"}}))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(response).await, "Missing required field: message");
}

#[tokio::test]
async fn test_wrong_message_type_is_validation_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_message(Some(API_KEY), &json!({"message": 42}))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .header("content-type", "application/json")
        .body("{\"message\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(response).await, "Malformed JSON in request body");
}

#[tokio::test]
async fn test_missing_content_type_is_parsed_as_json() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .body(r#"{"message": "Show me admin panel"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["reply"],
        "Received your message: 'Show me admin panel'. How can I help you further?"
    );
}

#[tokio::test]
async fn test_form_content_type_is_validation_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("message=hi")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_duplicate_key_uses_last_value() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .header("content-type", "application/json")
        .body(r#"{"message": "a", "message": "b"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["reply"],
        "Received your message: 'b'. How can I help you further?"
    );
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/honeypot/message"))
        .header("x-api-key", API_KEY)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Documentation Tests
// ============================================================================

#[tokio::test]
async fn test_openapi_document_without_key() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/openapi.json"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = response.json().await.unwrap();
    assert!(doc["paths"].get("/honeypot/message").is_some());
    assert_eq!(
        doc["components"]["securitySchemes"]["api_key"]["name"],
        "x-api-key"
    );
}

#[tokio::test]
async fn test_docs_pages_without_key() {
    let fixture = TestFixture::with_config(Config::default()).await;

    for path in ["/docs/", "/redoc"] {
        let response = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let html = response.text().await.unwrap();
        assert!(html.to_lowercase().contains("<html"), "{path}");
    }
}

//! Backend health probe against a mocked backend.

use speedfit::adapters::ReqwestHttpClient;
use speedfit::client::run_health_check;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_healthy_backend_with_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "model_loaded": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = run_health_check(&ReqwestHttpClient::new(), &server.uri()).await;

    assert!(result.backend_healthy);
    assert!(result.model_loaded);
    assert!(result.ready());
    assert!(result.response_time_ms.is_some());
}

#[tokio::test]
async fn test_backend_without_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "model_loaded": false
        })))
        .mount(&server)
        .await;

    let result = run_health_check(&ReqwestHttpClient::new(), &server.uri()).await;

    assert!(result.backend_healthy);
    assert!(!result.ready());
}

#[tokio::test]
async fn test_backend_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = run_health_check(&ReqwestHttpClient::new(), &server.uri()).await;

    assert!(!result.backend_healthy);
    assert_eq!(
        result.error_message.as_deref(),
        Some("health endpoint returned HTTP 502")
    );
}

#[tokio::test]
async fn test_unreachable_backend() {
    let result = run_health_check(&ReqwestHttpClient::new(), "http://127.0.0.1:9").await;

    assert!(!result.backend_healthy);
    assert!(result.response_time_ms.is_none());
    assert!(result.error_message.is_some());
}

//! HTTP-level tests: the real router, with wiremock standing in for OpenAI.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use babysafe_api::{
    application::http::server::http_server::{router, state},
    args::{Args, Environment},
};
use clap::Parser;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_args(mock_server: &MockServer, api_key: Option<&str>, env: Environment) -> Arc<Args> {
    let mut args = Args::parse_from(["babysafe-api"]);
    args.openai.openai_api_key = api_key.map(str::to_string);
    args.openai.openai_api_url = mock_server.uri();
    args.lookup.request_timeout_ms = 1000;
    args.lookup.max_attempts = 3;
    args.lookup.retry_delay_ms = 10;
    args.server.root_path = String::new();
    args.server.body_limit_bytes = 10 * 1024;
    args.env = env;
    Arc::new(args)
}

fn test_server(args: Arc<Args>) -> TestServer {
    let app_state = state(args).expect("state");
    TestServer::new(router(app_state).expect("router")).expect("test server")
}

fn chat_completion(content: &str) -> Value {
    json!({
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn salmon_payload() -> Value {
    json!({
        "name": "Salmon",
        "isSafe": true,
        "confidence": 0.95,
        "explanation": "...",
        "sourceUrl": "https://www.mayoclinic.org/pregnancy/food-safety"
    })
}

async fn mount_completion(mock_server: &MockServer, content: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(content)))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(&mock_server, None, Environment::Production));

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
}

#[tokio::test]
async fn test_search_returns_record_and_metadata() {
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &salmon_payload().to_string(), 1).await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "salmon" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], salmon_payload());
    assert_eq!(body["metadata"]["model"], "gpt-4");
    assert!(body["metadata"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_repeated_search_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &salmon_payload().to_string(), 1).await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let first: Value = server
        .post("/api/search")
        .json(&json!({ "query": "Salmon" }))
        .await
        .json();
    let second: Value = server
        .post("/api/search")
        .json(&json!({ "query": "  salmon " }))
        .await
        .json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_untrusted_source_url_is_cleared() {
    let mock_server = MockServer::start().await;
    let reply = json!({
        "name": "Test Food",
        "isSafe": true,
        "confidence": 0.9,
        "explanation": "Test explanation",
        "sourceUrl": "https://invalid-domain.com"
    });
    mount_completion(&mock_server, &format!("```json\n{reply}\n```"), 1).await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "test food" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Test Food");
    assert!(body["data"].get("sourceUrl").is_none());
}

#[tokio::test]
async fn test_invalid_query_is_rejected_without_lookup() {
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &salmon_payload().to_string(), 0).await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "<script>alert(1)</script>" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Invalid input",
        "details": "Query contains invalid characters"
    }));
}

#[tokio::test]
async fn test_short_query_is_rejected() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": " a " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Invalid input",
        "details": "Query must be between 2 and 100 characters"
    }));
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "food": "salmon" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid input");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "a".repeat(20 * 1024) }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Payload too large");
}

#[tokio::test]
async fn test_upstream_failure_hides_details_in_production() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(3)
        .mount(&mock_server)
        .await;
    let server = test_server(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "salmon" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Failed to fetch food safety information",
        "details": "An unexpected error occurred"
    }));
}

#[tokio::test]
async fn test_missing_api_key_details_in_development() {
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &salmon_payload().to_string(), 0).await;
    let server = test_server(test_args(&mock_server, None, Environment::Development));

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "salmon" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Failed to fetch food safety information",
        "details": "External service credential is not configured"
    }));
}

#[tokio::test]
async fn test_openapi_document_lists_search() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(&mock_server, None, Environment::Production));

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"].get("/api/search").is_some());
}

#[tokio::test]
async fn test_search_is_rate_limited_per_client() {
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &salmon_payload().to_string(), 0).await;
    let mut args = Arc::unwrap_or_clone(test_args(
        &mock_server,
        Some("test-key"),
        Environment::Production,
    ));
    args.rate_limit.max_requests = 5;
    let server = test_server(Arc::new(args));

    for remaining in (0..5).rev() {
        let response = server
            .post("/api/search")
            .json(&json!({ "query": "x" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("ratelimit-limit"), "5");
        assert_eq!(
            response.header("ratelimit-remaining"),
            remaining.to_string().as_str()
        );
    }

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "salmon" }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    response.assert_json(&json!({
        "error": "Too many requests",
        "details": "Too many requests from this IP, please try again later."
    }));
    assert!(response.headers().contains_key("retry-after"));
    assert_eq!(response.header("x-content-type-options"), "nosniff");
}

#[tokio::test]
async fn test_zero_max_requests_disables_rate_limit() {
    let mock_server = MockServer::start().await;
    let mut args = Arc::unwrap_or_clone(test_args(&mock_server, None, Environment::Production));
    args.rate_limit.max_requests = 0;
    let server = test_server(Arc::new(args));

    for _ in 0..20 {
        server.get("/health").await.assert_status_ok();
    }
}

#[tokio::test]
async fn test_metrics_endpoint_renders_request_counters() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(&mock_server, None, Environment::Production));

    server.get("/health").await.assert_status_ok();
    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("axum_http_requests_total"));
}

#[tokio::test]
async fn test_root_path_prefixes_routes_and_openapi_paths() {
    let mock_server = MockServer::start().await;
    let mut args = Arc::unwrap_or_clone(test_args(&mock_server, None, Environment::Production));
    args.server.root_path = "/v1".to_string();
    let server = test_server(Arc::new(args));

    server.get("/v1/health").await.assert_status_ok();
    server
        .get("/health")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/v1/api-docs/openapi.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let mut paths: Vec<&str> = body["paths"]
        .as_object()
        .expect("paths object")
        .keys()
        .map(String::as_str)
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["/v1/api/search", "/v1/health"]);
}

#[tokio::test]
async fn test_api_responses_carry_content_security_policy() {
    let mock_server = MockServer::start().await;
    let server = test_server(test_args(&mock_server, None, Environment::Production));

    let response = server.get("/health").await;

    let policy = response.header("content-security-policy");
    let policy = policy.to_str().expect("ascii header");
    assert!(policy.starts_with("default-src 'self';"));
    assert!(policy.contains("connect-src 'self' https://api.openai.com"));
}

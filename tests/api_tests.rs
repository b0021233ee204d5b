//! API integration tests.
//!
//! Drives the two endpoints through the router directly. The handlers are
//! tested without the middleware stack because the rate limiter keys on the
//! peer address, which `oneshot` requests don't carry.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crm_link::web::server::{api_router, create_router, MAX_BODY_SIZE};

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_match_endpoint_links_by_account_number() {
    let request = post_json(
        "/api/match",
        &json!({
            "customers": [
                {"id": "fb-1001", "name": "Acme Co", "accountNumber": "ABC-123"},
                {"id": "fb-1002", "name": "No Keys Here"}
            ],
            "companies": [
                {"id": 88412, "name": "Acme Co", "accountNumber": "abc123"}
            ]
        }),
    );

    let response = api_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response.into_body()).await;
    assert_eq!(report["summary"]["matched"], 1);
    assert_eq!(report["summary"]["unmatched"], 1);
    assert_eq!(report["matches"][0]["strategy"], "account_number");
    assert_eq!(report["matches"][0]["confidence"], "high");
    assert_eq!(report["matches"][0]["matched_identifier"], "abc123");
    assert_eq!(report["matches"][0]["company_id"], "88412");
    assert_eq!(report["unmatched"][0]["reason"], "no_join_keys");
}

#[tokio::test]
async fn test_match_endpoint_reports_collisions() {
    let request = post_json(
        "/api/match",
        &json!({
            "customers": [{"id": "L1", "accountNumber": "x1"}],
            "companies": [
                {"id": "R1", "accountNumber": "X1"},
                {"id": "R2", "accountNumber": "x-1"}
            ]
        }),
    );

    let response = api_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response.into_body()).await;
    assert_eq!(report["matches"][0]["company_id"], "R2");
    assert_eq!(report["summary"]["collisions"][0]["key"], "x1");
}

#[tokio::test]
async fn test_match_endpoint_rejects_missing_id() {
    let request = post_json(
        "/api/match",
        &json!({
            "customers": [{"id": "   "}],
            "companies": []
        }),
    );

    let response = api_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response.into_body()).await;
    assert_eq!(error["error_type"], "invalid_input");
    // internal detail must not leak to the client
    assert_eq!(error["details"], Value::Null);
}

#[tokio::test]
async fn test_match_endpoint_rejects_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/match")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = api_router().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_apply_endpoint_without_credentials_is_unavailable() {
    // No COPPER_* configuration in the test environment
    std::env::remove_var("COPPER_API_KEY");
    std::env::remove_var("COPPER_USER_EMAIL");
    std::env::remove_var("COPPER_ORDER_ID_FIELD");

    let request = post_json(
        "/api/apply",
        &json!({
            "overrides": [{"company_id": "88412", "account_order_id": "4417"}]
        }),
    );

    let response = api_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let error = body_json(response.into_body()).await;
    assert_eq!(error["error_type"], "crm_unconfigured");
}

#[test]
fn test_full_router_builds() {
    // The middleware stack (headers, governor, timeout, limits) must
    // assemble without panicking
    let _router = create_router();
}

#[test]
fn test_body_limit_bounds_memory() {
    // 100 concurrent requests at the body cap stay under a few GB
    let concurrent = 100;
    assert!(concurrent * MAX_BODY_SIZE < 4 * 1024 * 1024 * 1024usize);
}

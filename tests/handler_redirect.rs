mod common;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use link_registrar::routes::router;
use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = common::create_test_state();
    common::create_test_mapping(&store, "aB3-x_Z", "https://example.com/a/b?q=1").await;

    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/aB3-x_Z").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/a/b?q=1"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Short URL not found.");
}

#[tokio::test]
async fn test_redirect_root_goes_to_fallback() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header(header::LOCATION), common::FALLBACK_URL);
}

#[tokio::test]
async fn test_redirect_percent_encoded_alias() {
    let (state, store) = common::create_test_state();
    common::create_test_mapping(&store, "a?b#", "https://example.com/odd").await;

    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/a%3Fb%23").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header(header::LOCATION), "https://example.com/odd");
}

#[tokio::test]
async fn test_redirect_store_failure() {
    let server = TestServer::new(router(common::create_failing_state())).unwrap();

    let response = server.get("/abc1234").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Internal server error.");
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    let created = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://example.com/landing" }))
        .await
        .json::<serde_json::Value>();
    let code = created["shortCode"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/landing"
    );
}

#[tokio::test]
async fn test_redirect_alias_with_special_chars() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    let created = server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://example.com/promo",
            "customShortCode": "50%off?"
        }))
        .await
        .json::<serde_json::Value>();
    assert_eq!(created["shortUrl"], "https://itsurl.com/50%25off%3F");

    let response = server.get("/50%25off%3F").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/promo"
    );
}

#[tokio::test]
async fn test_redirect_target_not_valid_as_header() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://example.com/a\nb",
            "customShortCode": "ctl"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/ctl").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.maybe_header(header::LOCATION).is_none());

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Internal server error.");
}

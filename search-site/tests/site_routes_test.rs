//! Router-level tests for the page and its assets. No network involved.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use search_site::config::AiSearchSettings;
use search_site::services::AiSearchClient;
use search_site::startup::build_router;
use search_site::AppState;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    let ai_search = AiSearchClient::new(AiSearchSettings::default());
    build_router(AppState::new(Arc::new(ai_search)))
}

async fn send(method: Method, uri: &str) -> axum::response::Response {
    app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_serves_html_page() {
    let response = send(Method::GET, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html;charset=UTF-8"
    );

    let body = body_text(response).await;
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains(r#"<link rel="stylesheet" href="/style.css">"#));
    assert!(body.contains(r#"<script src="/script.js"></script>"#));
}

#[tokio::test]
async fn stylesheet_is_served_as_css() {
    let response = send(Method::GET, "/style.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert!(body_text(response).await.contains(".search-wrapper"));
}

#[tokio::test]
async fn script_is_served_as_javascript() {
    let response = send(Method::GET, "/script.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
    assert!(body_text(response).await.contains("/api/search?q="));
}

#[tokio::test]
async fn unmatched_paths_serve_the_page() {
    let expected = body_text(send(Method::GET, "/").await).await;

    for uri in ["/foo", "/a/b/c", "/style.css/extra", "/index.html?x=1"] {
        let response = send(Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "status for {uri}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html;charset=UTF-8",
            "content type for {uri}"
        );
        assert_eq!(body_text(response).await, expected, "body for {uri}");
    }
}

#[tokio::test]
async fn site_routes_ignore_method() {
    let response = send(Method::POST, "/style.css").await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let page = body_text(send(Method::GET, "/").await).await;
    for (method, uri) in [
        (Method::DELETE, "/anything"),
        (Method::POST, "/health"),
        (Method::POST, "/ready"),
        (Method::PUT, "/metrics"),
    ] {
        let response = send(method.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "status for {method} {uri}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html;charset=UTF-8",
            "content type for {method} {uri}"
        );
        assert_eq!(body_text(response).await, page, "body for {method} {uri}");
    }
}

#[tokio::test]
async fn search_uses_first_of_repeated_query() {
    // No credentials: a forwarded query fails upstream rather than being rejected
    let response = send(Method::GET, "/api/search?q=&q=b").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Missing query");

    let response = send(Method::GET, "/api/search?q=a&q=b").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_query_needs_no_upstream() {
    let response = send(Method::GET, "/api/search").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Missing query");
}

#[tokio::test]
async fn responses_carry_security_headers_and_request_id() {
    let response = send(Method::GET, "/").await;
    let headers = response.headers();

    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert!(headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|csp| csp.starts_with("default-src 'self'")));
    assert!(headers.contains_key("x-request-id"));
}

use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;

pub const INDEX_HTML: &str = include_str!("../../assets/index.html");
pub const STYLE_CSS: &str = include_str!("../../assets/style.css");
pub const SCRIPT_JS: &str = include_str!("../../assets/script.js");

pub const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";
pub const CSS_CONTENT_TYPE: &str = "text/css";
pub const JS_CONTENT_TYPE: &str = "application/javascript";

/// The page itself. Also serves every path no other route claims.
pub async fn index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], INDEX_HTML)
}

pub async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, CSS_CONTENT_TYPE)], STYLE_CSS)
}

pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, JS_CONTENT_TYPE)], SCRIPT_JS)
}

/// Health check endpoint for liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "search-site",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness: searches can only succeed once every upstream credential is set.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let missing = state.ai_search.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::ServiceUnavailable(format!(
            "AI search not configured: missing {}",
            missing.join(", ")
        )));
    }

    Ok((StatusCode::OK, Json(json!({ "status": "ready" }))))
}

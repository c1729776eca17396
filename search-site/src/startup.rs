//! Router construction and server lifecycle.

use axum::{middleware::from_fn, routing::any, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use service_core::observability::REQUEST_ID_HEADER;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{
    app::{health_check, index, readiness_check, script, style},
    metrics::metrics,
    search::search,
};
use crate::services::AiSearchClient;
use crate::AppState;

/// Build the site router.
///
/// The three site routes answer any method; every other path, and any non-GET
/// request to the ops routes, falls through to the page.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/style.css", any(style))
        .route("/script.js", any(script))
        .route("/api/search", any(search))
        // Ops routes answer GET; other methods fall through to the page
        .route("/health", get(health_check).fallback(index))
        .route("/ready", get(readiness_check).fallback(index))
        .route("/metrics", get(metrics).fallback(index))
        .fallback(index)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the span above already sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and assemble the router. Port 0 picks a random port.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let ai_search = AiSearchClient::new(settings.ai_search.clone());
        if ai_search.is_configured() {
            tracing::info!(
                top_k = settings.ai_search.top_k,
                "AI search client initialized"
            );
        } else {
            tracing::warn!(
                missing = ?ai_search.missing_fields(),
                "AI search credentials not configured - searches will fail"
            );
        }

        let router = build_router(AppState::new(Arc::new(ai_search)));

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("search-site listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

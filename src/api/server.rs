//! Axum API server.

use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::{delete, get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analysis::AnalysisClient;
use crate::cache::ResultCache;
use crate::config::ServerConfig;

/// Path prefix the front-end bundle is served under.
pub const STATIC_PREFIX: &str = "/app";

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide analysis cache.
    pub cache: ResultCache,
    /// Model-backed analysis client.
    pub analyzer: AnalysisClient,
}

impl AppState {
    pub fn new(cache: ResultCache, analyzer: AnalysisClient) -> Self {
        Self { cache, analyzer }
    }
}

/// Build the axum router.
///
/// When `static_dir` is given the front-end is mounted under
/// [`STATIC_PREFIX`] and `/` redirects there.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let shared_state = Arc::new(state);

    let mut app = Router::new()
        .route("/health", get(super::routes::health::get_health))
        .route("/analyze-topic", post(super::routes::analyze::analyze_topic))
        .route("/cache", delete(super::routes::cache::clear_cache));

    if let Some(dir) = static_dir {
        app = app
            .route(
                "/",
                get(|| async { Redirect::temporary(&format!("{STATIC_PREFIX}/")) }),
            )
            .nest_service(
                STATIC_PREFIX,
                ServeDir::new(dir).append_index_html_on_directories(true),
            );
    }

    app
        // Body size limit: 1 MiB. Topics are capped at 2000 chars anyway.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Resolve the static directory, dropping it when it does not exist.
pub fn resolve_static_dir(dir: &std::path::Path) -> Option<PathBuf> {
    if dir.is_dir() {
        Some(dir.to_path_buf())
    } else {
        warn!(
            path = %dir.display(),
            "Static directory not found, front-end will not be served"
        );
        None
    }
}

/// Start the API server and run until Ctrl-C / SIGTERM.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state, resolve_static_dir(&config.static_dir));
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("5W1H analysis API listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down 5W1H analysis API");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::providers::MockGenerativeModel;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            ResultCache::in_memory(&CacheConfig::default()),
            AnalysisClient::new(Arc::new(MockGenerativeModel::new())),
        )
    }

    async fn send(app: Router, method: &str, uri: &str) -> axum::response::Response {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let resp = send(build_router(test_state(), None), "GET", "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_clear_cache_route() {
        let resp = send(build_router(test_state(), None), "DELETE", "/cache").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_redirects_to_static_prefix() {
        let dir = std::env::temp_dir();
        let resp = send(build_router(test_state(), Some(dir)), "GET", "/").await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()[header::LOCATION], "/app/");
    }

    #[tokio::test]
    async fn test_no_static_dir_means_no_root_route() {
        let resp = send(build_router(test_state(), None), "GET", "/").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_resolve_static_dir_missing() {
        let missing = std::env::temp_dir().join("fivewh-no-such-dir-for-tests");
        assert!(resolve_static_dir(&missing).is_none());
        assert!(resolve_static_dir(&std::env::temp_dir()).is_some());
    }
}

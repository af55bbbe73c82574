//! Router assembly and the listening loop for the form API

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;

/// Browser origins accepted when CORS is not permissive
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:5080",
    "http://127.0.0.1:5080",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, 127.0.0.1:5080 unless configured
    pub bind_addr: SocketAddr,

    /// Accept any origin instead of [`LOCAL_ORIGINS`]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5080)),
            cors_permissive: false,
        }
    }
}

/// Shared application state.
///
/// Only the pool is shared; every request builds its own `UnitOfWork`.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS is permissive, any origin may call the form API");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health and form routes over `pool`, with CORS and request tracing.
pub fn build_router(pool: SqlitePool, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::forms::router())
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { pool }))
}

/// Serve the form API until Ctrl+C or SIGTERM.
///
/// ```ignore
/// let pool = formctl_server::db::open(&database_url).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    tracing::info!(addr = %config.bind_addr, "form API listening");

    axum::serve(listener, build_router(pool, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("form API stopped");
    Ok(())
}

/// Resolves on the first shutdown signal. A handler that cannot be installed
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "ctrl-c", "shutting down"),
        _ = terminate => tracing::info!(signal = "sigterm", "shutting down"),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server stopped with an I/O error: {0}")]
    Serve(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::pool::test_pool;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5080);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn health_is_routed() {
        let (_dir, pool) = test_pool().await;
        let app = build_router(pool, &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn localhost_origin_is_allowed() {
        let (_dir, pool) = test_pool().await;
        let app = build_router(pool, &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/formapi/titles")
                    .header("origin", "http://localhost:5080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5080"
        );
    }

    #[tokio::test]
    async fn occupied_address_is_a_bind_error() {
        let (_dir, pool) = test_pool().await;
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_addr: taken.local_addr().unwrap(),
            cors_permissive: false,
        };

        let err = run_server(pool, config.clone()).await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { addr, .. } if addr == config.bind_addr));
    }

    #[tokio::test]
    async fn permissive_cors_echoes_any_origin() {
        let (_dir, pool) = test_pool().await;
        let config = ServerConfig {
            cors_permissive: true,
            ..ServerConfig::default()
        };
        let app = build_router(pool, &config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/formapi/titles")
                    .header("origin", "http://forms.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_some());
    }

    #[tokio::test]
    async fn foreign_origin_gets_no_cors_header() {
        let (_dir, pool) = test_pool().await;
        let app = build_router(pool, &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/formapi/titles")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}

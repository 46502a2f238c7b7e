//! Mock Admin API
//!
//! A local stand-in for the admin REST API, built with Axum. It serves
//! fixture data under the same paths as the live API so the client, the
//! CLI and the test suite can run offline.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness and uptime
//! - `GET /api/v1/admin/dashboard/stats` - Dashboard stats
//! - `GET /api/v1/admin/patients?limit=N` - Recent patients
//! - `POST /api/v1/auth/login` - Login
//!
//! Admin endpoints answer `401 {"message": "Unauthenticated."}` unless the
//! request carries a bearer token issued by the login route.

pub mod error;
pub mod fixtures;
pub mod routes;
pub mod state;

pub use error::MockError;
pub use state::{MockState, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Listen address of the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub host: String,
    pub port: u16,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

impl MockConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL a client should be configured with
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr())
    }
}

/// Build the mock router with all routes and middleware
pub fn build_router(state: MockState) -> Router {
    let api_routes = Router::new()
        .route("/admin/dashboard/stats", get(routes::dashboard_stats))
        .route("/admin/patients", get(routes::recent_patients))
        .route("/auth/login", post(routes::login));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM
pub async fn serve(state: MockState, config: &MockConfig) -> std::io::Result<()> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Mock admin API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Mock admin API shut down gracefully");
    Ok(())
}

/// Serve on an ephemeral local port in the background
pub async fn spawn(state: MockState) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = build_router(state);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Mock admin API stopped");
        }
    });

    Ok(addr)
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

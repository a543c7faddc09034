//! Application startup and lifecycle management.
//!
//! The server is an explicit object: the route table is handed to the router
//! builder at construction time and the listener is owned by [`Application`].

use crate::config::NotifierConfig;
use crate::handlers::{health_check, metrics_endpoint, serve_data};
use crate::services::PayloadFactory;
use axum::{
    middleware::from_fn,
    routing::{any, get, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NotifierConfig>,
    pub payloads: Arc<PayloadFactory>,
}

impl AppState {
    pub fn new(config: NotifierConfig) -> Result<Self, AppError> {
        let payloads = PayloadFactory::from_config(&config)
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        Ok(Self {
            config: Arc::new(config),
            payloads: Arc::new(payloads),
        })
    }
}

pub type RouteTable = Vec<(&'static str, MethodRouter<AppState>)>;

/// Every path the service answers, with its handler.
pub fn route_table() -> RouteTable {
    vec![
        ("/data", any(serve_data)),
        ("/health", get(health_check)),
        ("/metrics", get(metrics_endpoint)),
    ]
}

pub fn build_router(state: AppState, routes: RouteTable) -> Router {
    routes
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            router.route(path, handler)
        })
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
    /// Build the application with the given configuration.
    pub async fn build(config: NotifierConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::new(config).map_err(|e| {
            tracing::error!("Failed to build application state: {}", e);
            e
        })?;

        // Port 0 picks a random port for testing
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            key_bits = state.config.signing.key_bits,
            encoding = %state.config.response.encoding,
            "Notifier service listening"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state, route_table()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until a shutdown signal arrives, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
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

    tracing::info!("Shutdown signal received");
}

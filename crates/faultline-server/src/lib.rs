#![allow(clippy::must_use_candidate)]

mod error;
mod health;
mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use faultline_config::{Config, ErrorsConfig};
use faultline_core::Failure;
use faultline_mapper::{ErrorMapper, OtelErrorMetrics, Responder, StatusTable, identity};
use http::{StatusCode, Uri};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

pub use error::{ApiError, Suppressed, client_closed_request, outcome_response};
pub use middleware::error_mapper_middleware;

/// Assembled server with routes and the error layer
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build a server exposing only the health check and the fallback
    ///
    /// # Errors
    ///
    /// Returns an error if the error mapper cannot be built from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_routes(config, Router::new())
    }

    /// Build a server around application routes
    ///
    /// Failures raised by `routes` as [`ApiError`], panics inside them and
    /// requests no route matches all go through the error layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the error mapper cannot be built from configuration
    pub fn with_routes(config: &Config, routes: Router) -> anyhow::Result<Self> {
        let mapper = build_mapper(&config.errors)?;
        Ok(Self::with_mapper(config, routes, mapper))
    }

    /// Build a server around application routes and a prepared error mapper
    ///
    /// The `[errors]` section is ignored; `mapper` decides statuses, the
    /// instance name and where error counts go.
    pub fn with_mapper(config: &Config, routes: Router, mapper: ErrorMapper) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mapper = Arc::new(mapper);
        tracing::info!(instance = mapper.responder().instance(), "error mapper ready");

        let mut app = routes;

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.fallback(no_resource_found);

        // Apply middleware layers (innermost first)

        // Panics become raised failures before the mapper sees the response
        app = app.layer(CatchPanicLayer::custom(error::panic_response));

        app = app.layer(axum::middleware::from_fn_with_state(mapper, error_mapper_middleware));

        // The mapper already logs every failure at error level
        app = app.layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)));

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Build the error mapper described by the `[errors]` section
///
/// # Errors
///
/// Returns an error if a configured status is not a valid HTTP status
pub fn build_mapper(config: &ErrorsConfig) -> anyhow::Result<ErrorMapper> {
    let mut table = StatusTable::builtin();
    for (kind, status) in config.status_entries() {
        let status =
            StatusCode::from_u16(status).map_err(|e| anyhow::anyhow!("invalid status {status} for {kind}: {e}"))?;
        table = table.with_status(kind, status);
    }

    let instance = config
        .instance
        .clone()
        .unwrap_or_else(|| identity::server_id().to_owned());

    let responder = Responder::new(instance, table, Arc::new(OtelErrorMetrics::default()));

    Ok(ErrorMapper::new(responder))
}

async fn no_resource_found(uri: Uri) -> ApiError {
    ApiError(Failure::no_resource_found(uri.path()))
}

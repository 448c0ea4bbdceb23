// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Builds the router from route structs and runs it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Server assembly
//!
//! [`ServerResources`] bundles the database handle and configuration behind a
//! single `Arc` shared by every route struct. [`build_router`] is used both by
//! the binary and by tests, which drive the router directly with `oneshot`
//! requests instead of binding a port.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::ServerConfig,
    database::Database,
    errors::{AppError, AppResult},
    health::HealthRoutes,
    routes::{self, auth::AuthRoutes, coaches::CoachRoutes},
};

/// Shared resources for all route handlers
pub struct ServerResources {
    /// Database connection pool
    pub database: Database,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle a database handle and configuration
    #[must_use]
    pub const fn new(database: Database, config: ServerConfig) -> Self {
        Self { database, config }
    }
}

/// Build the full application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let routed = Router::new()
        .merge(CoachRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http());

    // The override must rewrite the method before the inner router dispatches
    // on it; a layer on `routed` itself would run after method matching.
    Router::new().fallback_service(
        tower::Layer::layer(&axum::middleware::from_fn(routes::method_override), routed),
    )
}

/// Run the HTTP server until shutdown
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = format!("0.0.0.0:{}", resources.config.http_port);
    let router = build_router(resources);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "Courtside server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    } else {
        info!("Shutdown signal received");
    }
}

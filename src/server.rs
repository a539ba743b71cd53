// ABOUTME: HTTP server assembly: router composition, middleware layers and graceful shutdown
// ABOUTME: Binds the configured address and serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    http::Uri,
    Router,
};
use nutriplan_core::constants::limits::MAX_REQUEST_BODY_BYTES;
use tokio::net::TcpListener;
use tower_http::{
    classify::ServerErrorsFailureClass,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, RecommendationRoutes};

/// Compose every route group with the shared middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let path = request
                .extensions()
                .get::<MatchedPath>()
                .map_or_else(|| request.uri().path(), MatchedPath::as_str);
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            info_span!(
                "http_request",
                method = %request.method(),
                path = %path,
                request_id = %request_id,
            )
        })
        .on_request(|_request: &Request, _span: &Span| {})
        .on_response(
            |response: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                info!(
                    status = %response.status().as_u16(),
                    latency_ms = %latency.as_millis(),
                    "request completed"
                );
            },
        )
        .on_failure(
            |failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                error!(
                    error = %failure,
                    latency_ms = %latency.as_millis(),
                    "request failed"
                );
            },
        );

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(RecommendationRoutes::routes(resources))
        .fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Bind the configured address and serve until a shutdown signal
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(config: &ServerConfig, resources: Arc<ServerResources>) -> AppResult<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        AppError::config(format!("Failed to bind {address}: {e}")).with_source(e)
    })?;

    info!(address = %address, "Recommendation server listening");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")).with_source(e))?;

    info!("Recommendation server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

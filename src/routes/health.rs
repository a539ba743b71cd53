// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness reports uptime; readiness reports cache and fallback asset state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/ready` stays 200 when the fallback asset is degraded: requests are
//! still answered, only with an empty fallback record.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "uptime_seconds": resources.uptime_seconds(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let service = &resources.service;
        Json(json!({
            "status": "ready",
            "llm_provider": service.provider().name(),
            "cache_capacity": service.cache().capacity(),
            "fallback_degraded": service.fallback().is_degraded(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}

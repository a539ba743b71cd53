// ABOUTME: Route module organization for the recommendation server HTTP endpoints
// ABOUTME: Groups handlers by domain; each module exposes a routes() constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check and readiness routes
pub mod health;
/// Recommendation submission and statistics routes
pub mod recommendations;

pub use health::HealthRoutes;
pub use recommendations::{RecommendationResponse, RecommendationRoutes};

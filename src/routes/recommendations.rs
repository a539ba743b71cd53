// ABOUTME: Recommendation route handlers for form and JSON profile submissions
// ABOUTME: Always answers 200 with a fully shaped record; failures surface as the fallback source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation routes
//!
//! Handlers are thin: they decode the submission, call the service and
//! serialize the outcome. Only a body that cannot be decoded at all is
//! rejected; everything past decoding ends in a 200 response.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, State},
    routing::{get, post},
    Form, Json, Router,
};
use nutriplan_core::models::{ProfileSubmission, RecommendationRecord};
use serde::Serialize;

use crate::errors::AppError;
use crate::recommendations::{Fingerprint, RecommendationOutcome, RecommendationSource, ServiceStats};
use crate::resources::ServerResources;

/// Body returned for every recommendation request
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Provenance of the record
    pub source: RecommendationSource,
    /// Validation messages to show the user
    pub advisories: Vec<String>,
    /// Cache key of the normalized profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    /// The recommendation itself
    pub recommendation: RecommendationRecord,
}

impl From<RecommendationOutcome> for RecommendationResponse {
    fn from(outcome: RecommendationOutcome) -> Self {
        Self {
            source: outcome.source,
            advisories: outcome.advisories,
            fingerprint: outcome.fingerprint,
            recommendation: outcome.record,
        }
    }
}

/// Counters and cache state
#[derive(Debug, Serialize)]
pub struct RecommendationStatsResponse {
    /// Service counters
    #[serde(flatten)]
    pub counters: ServiceStats,
    /// Records currently cached
    pub cache_size: usize,
    /// Cache capacity
    pub cache_capacity: usize,
    /// Whether the empty fallback record is being served
    pub fallback_degraded: bool,
}

/// Recommendation routes
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recommend", post(Self::handle_form_submission))
            .route("/api/recommendations", post(Self::handle_json_submission))
            .route("/api/recommendations/stats", get(Self::handle_stats))
            .with_state(resources)
    }

    async fn handle_form_submission(
        State(resources): State<Arc<ServerResources>>,
        submission: Result<Form<ProfileSubmission>, FormRejection>,
    ) -> Result<Json<RecommendationResponse>, AppError> {
        let Form(submission) = submission
            .map_err(|e| AppError::invalid_input(format!("Unreadable form body: {e}")))?;
        Ok(Self::respond(&resources, &submission).await)
    }

    async fn handle_json_submission(
        State(resources): State<Arc<ServerResources>>,
        submission: Result<Json<ProfileSubmission>, JsonRejection>,
    ) -> Result<Json<RecommendationResponse>, AppError> {
        let Json(submission) = submission
            .map_err(|e| AppError::invalid_input(format!("Unreadable JSON body: {e}")))?;
        Ok(Self::respond(&resources, &submission).await)
    }

    async fn respond(
        resources: &ServerResources,
        submission: &ProfileSubmission,
    ) -> Json<RecommendationResponse> {
        let outcome = resources.service.recommend(submission).await;
        Json(outcome.into())
    }

    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<RecommendationStatsResponse> {
        let service = &resources.service;
        Json(RecommendationStatsResponse {
            counters: service.stats(),
            cache_size: service.cache().len().await,
            cache_capacity: service.cache().capacity(),
            fallback_degraded: service.fallback().is_degraded(),
        })
    }
}

// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Wires cache, completion provider and fallback into one recommendation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dependency injection container for request handlers
//!
//! Nothing in the server lives in a global: the cache, the fallback record
//! and the completion client are built once here and shared through `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::cache::memory::InMemoryCache;
use crate::cache::RecommendationCache;
use crate::config::ServerConfig;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::recommendations::{FallbackProvider, RecommendationService};

/// Resources shared by all handlers
pub struct ServerResources {
    /// Recommendation orchestrator
    pub service: Arc<RecommendationService>,
    /// Process start time, reported by the health endpoint
    pub started_at: DateTime<Utc>,
}

impl ServerResources {
    /// Wrap an already constructed service
    #[must_use]
    pub fn new(service: Arc<RecommendationService>) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }

    /// Build production resources from configuration
    ///
    /// The fallback record is loaded here, once. Without an override path the
    /// compiled-in asset is used; a missing or malformed override degrades to
    /// the empty record instead of failing startup.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let cache: Arc<dyn RecommendationCache> = Arc::new(InMemoryCache::new(&config.cache));
        let provider: Arc<dyn LlmProvider> = Arc::new(
            GeminiProvider::new(config.gemini.api_key.clone())
                .with_base_url(config.gemini.base_url.clone())
                .with_default_model(config.gemini.model.clone()),
        );
        let fallback = Arc::new(
            config
                .fallback_asset_path
                .as_ref()
                .map_or_else(FallbackProvider::packaged, FallbackProvider::load),
        );

        info!(
            cache.capacity = cache.capacity(),
            llm.provider = provider.name(),
            llm.model = provider.default_model(),
            fallback.degraded = fallback.is_degraded(),
            "Recommendation service initialized"
        );

        let service = RecommendationService::new(cache, provider, fallback)
            .with_options(config.generation_options());
        Self::new(Arc::new(service))
    }

    /// Seconds since the resources were built
    #[must_use]
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

// ABOUTME: Recommendation orchestrator composing validation, cache, generation and extraction
// ABOUTME: Every failure path ends on the fallback record; only extracted records are cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Service
//!
//! Each request moves through
//! `Validating -> CacheLookup -> Generating -> Extracting -> Caching -> Done`,
//! and any stage may divert to `Fallback -> Done`. The service is the only
//! caller of the pipeline components and never returns an error: the worst
//! case is the fallback record.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use nutriplan_core::constants::env_config::{
    DEFAULT_LLM_MAX_RETRIES, DEFAULT_LLM_RETRY_BACKOFF_MS, DEFAULT_LLM_TIMEOUT_SECS,
};
use nutriplan_core::constants::limits::MAX_GENERATION_RETRIES;
use nutriplan_core::errors::{AppError, ErrorCode, PipelineError};
use nutriplan_core::models::{ProfileSubmission, RecommendationRecord, UserProfile};
use serde::Serialize;
use tracing::{debug, warn};

use super::extractor::extract;
use super::fallback::FallbackProvider;
use super::fingerprint::{fingerprint, Fingerprint};
use super::validator::normalize;
use crate::cache::RecommendationCache;
use crate::llm::prompts::build_recommendation_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;

/// Pipeline state a request is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Checking the submission
    Validating,
    /// Computing the fingerprint and consulting the cache
    CacheLookup,
    /// Waiting on the completion service
    Generating,
    /// Recovering the record from the completion text
    Extracting,
    /// Storing the extracted record
    Caching,
    /// Substituting the fallback record
    Fallback,
    /// Returning to the caller
    Done,
}

impl PipelineStage {
    /// Lowercase label for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::CacheLookup => "cache_lookup",
            Self::Generating => "generating",
            Self::Extracting => "extracting",
            Self::Caching => "caching",
            Self::Fallback => "fallback",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request ended on the fallback record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The submission was rejected
    Validation,
    /// The completion service failed or timed out
    Generation,
    /// The completion held no usable record
    Extraction,
    /// An unexpected internal failure
    Internal,
}

impl From<&PipelineError> for FallbackReason {
    fn from(error: &PipelineError) -> Self {
        match error {
            PipelineError::Validation { .. } => Self::Validation,
            PipelineError::Generation(_) => Self::Generation,
            PipelineError::Extraction(_) => Self::Extraction,
            PipelineError::Internal(_) => Self::Internal,
        }
    }
}

/// Where the returned record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Generated and extracted for this request
    Generated,
    /// Served from the response cache
    Cached,
    /// The static fallback record
    Fallback {
        /// Stage that failed
        reason: FallbackReason,
    },
}

impl RecommendationSource {
    /// Short label for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Cached => "cached",
            Self::Fallback { .. } => "fallback",
        }
    }
}

/// Result of one recommendation request
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    /// Always fully shaped
    pub record: RecommendationRecord,
    /// Provenance of `record`
    pub source: RecommendationSource,
    /// User-facing validation messages; empty unless validation failed
    pub advisories: Vec<String>,
    /// Cache key, when validation succeeded
    pub fingerprint: Option<Fingerprint>,
}

impl RecommendationOutcome {
    /// Whether the fallback record was served
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, RecommendationSource::Fallback { .. })
    }
}

/// Tuning for the completion call
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Upper bound on a single completion call
    pub timeout: Duration,
    /// Extra attempts after the first failed call
    pub max_retries: u32,
    /// Delay before the first retry; doubles per retry
    pub retry_backoff: Duration,
    /// Model override; the provider default applies when absent
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            max_retries: DEFAULT_LLM_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_LLM_RETRY_BACKOFF_MS),
            model: None,
            temperature: None,
        }
    }
}

/// Snapshot of the service counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Records generated and extracted
    pub generated: u64,
    /// Requests answered from the cache
    pub cache_hits: u64,
    /// Requests answered with the fallback record
    pub fallbacks: u64,
}

#[derive(Debug, Default)]
struct Counters {
    generated: AtomicU64,
    cache_hits: AtomicU64,
    fallbacks: AtomicU64,
}

/// Recommendation orchestrator shared by all request handlers
pub struct RecommendationService {
    cache: Arc<dyn RecommendationCache>,
    provider: Arc<dyn LlmProvider>,
    fallback: Arc<FallbackProvider>,
    options: GenerationOptions,
    counters: Counters,
}

impl RecommendationService {
    /// Create a service over explicitly constructed collaborators
    #[must_use]
    pub fn new(
        cache: Arc<dyn RecommendationCache>,
        provider: Arc<dyn LlmProvider>,
        fallback: Arc<FallbackProvider>,
    ) -> Self {
        Self {
            cache,
            provider,
            fallback,
            options: GenerationOptions::default(),
            counters: Counters::default(),
        }
    }

    /// Replace the generation options; retries are capped
    #[must_use]
    pub fn with_options(mut self, mut options: GenerationOptions) -> Self {
        options.max_retries = options.max_retries.min(MAX_GENERATION_RETRIES);
        self.options = options;
        self
    }

    /// Active generation options
    #[must_use]
    pub const fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Response cache
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn RecommendationCache> {
        &self.cache
    }

    /// Completion provider
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Fallback provider
    #[must_use]
    pub fn fallback(&self) -> &Arc<FallbackProvider> {
        &self.fallback
    }

    /// Counter snapshot
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            generated: self.counters.generated.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            fallbacks: self.counters.fallbacks.load(Ordering::Relaxed),
        }
    }

    /// Produce a recommendation for a submission
    ///
    /// Never fails: validation, generation, extraction and internal failures
    /// all resolve to the fallback record, which is never cached.
    pub async fn recommend(&self, submission: &ProfileSubmission) -> RecommendationOutcome {
        let started = Instant::now();

        trace_stage(PipelineStage::Validating, None);
        let profile = match normalize(submission) {
            Ok(profile) => profile,
            Err(e) => return self.fall_back(&e, None, started),
        };

        trace_stage(PipelineStage::CacheLookup, None);
        let key = match fingerprint(&profile) {
            Ok(key) => key,
            Err(e) => return self.fall_back(&PipelineError::Internal(e), None, started),
        };

        if let Some(record) = self.cache.get(&key).await {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Self::done(record, RecommendationSource::Cached, key, started);
        }
        debug!(fingerprint = %key.short(), "Cache miss");

        let record = match self.generate_record(&profile, &key).await {
            Ok(record) => record,
            Err(e) => return self.fall_back(&e, Some(key), started),
        };

        trace_stage(PipelineStage::Caching, Some(&key));
        let inserted = self.cache.put(key.clone(), record.clone()).await;
        debug!(fingerprint = %key.short(), inserted, "Stored generated recommendation");

        self.counters.generated.fetch_add(1, Ordering::Relaxed);
        Self::done(record, RecommendationSource::Generated, key, started)
    }

    /// `Generating` and `Extracting` stages
    async fn generate_record(
        &self,
        profile: &UserProfile,
        key: &Fingerprint,
    ) -> Result<RecommendationRecord, PipelineError> {
        trace_stage(PipelineStage::Generating, Some(key));
        let completion = self
            .generate(profile)
            .await
            .map_err(PipelineError::Generation)?;

        trace_stage(PipelineStage::Extracting, Some(key));
        Ok(extract(&completion)?)
    }

    /// Call the completion service, retrying transient failures
    async fn generate(&self, profile: &UserProfile) -> Result<String, AppError> {
        let request = self.build_request(profile);
        let mut backoff = self.options.retry_backoff;
        let mut attempt = 0_u32;

        loop {
            attempt += 1;
            let call_started = Instant::now();
            let result = self.complete_once(&request).await;
            AppLogger::log_completion_call(
                self.provider.name(),
                attempt,
                result.is_ok(),
                elapsed_ms(call_started),
            );

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt <= self.options.max_retries && is_retryable(&e) => {
                    warn!(
                        attempt,
                        max_retries = self.options.max_retries,
                        backoff_ms = millis(backoff),
                        error = %e,
                        "Completion call failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn complete_once(&self, request: &ChatRequest) -> Result<String, AppError> {
        let timeout = self.options.timeout;
        match tokio::time::timeout(timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => Ok(response.content),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AppError::external_timeout(self.provider.name(), timeout)),
        }
    }

    fn build_request(&self, profile: &UserProfile) -> ChatRequest {
        let mut request =
            ChatRequest::new(vec![ChatMessage::user(build_recommendation_prompt(profile))]);
        if let Some(model) = &self.options.model {
            request = request.with_model(model.clone());
        }
        if let Some(temperature) = self.options.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }

    fn fall_back(
        &self,
        error: &PipelineError,
        key: Option<Fingerprint>,
        started: Instant,
    ) -> RecommendationOutcome {
        let reason = FallbackReason::from(error);
        self.counters.fallbacks.fetch_add(1, Ordering::Relaxed);

        trace_stage(PipelineStage::Fallback, key.as_ref());
        AppLogger::log_fallback(
            error.kind(),
            &error.to_string(),
            key.as_ref().map(Fingerprint::as_str),
        );

        let advisories = match error {
            PipelineError::Validation { messages } => messages.clone(),
            _ => Vec::new(),
        };
        let source = RecommendationSource::Fallback { reason };

        trace_stage(PipelineStage::Done, key.as_ref());
        AppLogger::log_recommendation_served(
            source.label(),
            key.as_ref().map(Fingerprint::as_str),
            elapsed_ms(started),
        );

        RecommendationOutcome {
            record: self.fallback.get_fallback().clone(),
            source,
            advisories,
            fingerprint: key,
        }
    }

    fn done(
        record: RecommendationRecord,
        source: RecommendationSource,
        key: Fingerprint,
        started: Instant,
    ) -> RecommendationOutcome {
        trace_stage(PipelineStage::Done, Some(&key));
        AppLogger::log_recommendation_served(
            source.label(),
            Some(key.as_str()),
            elapsed_ms(started),
        );

        RecommendationOutcome {
            record,
            source,
            advisories: Vec::new(),
            fingerprint: Some(key),
        }
    }
}

fn trace_stage(stage: PipelineStage, key: Option<&Fingerprint>) {
    debug!(
        stage = %stage,
        fingerprint = key.map_or("-", Fingerprint::short),
        "Recommendation pipeline transition"
    );
}

/// Credential and configuration failures will not succeed on a second try
const fn is_retryable(error: &AppError) -> bool {
    !matches!(
        error.code,
        ErrorCode::ExternalAuthFailed
            | ErrorCode::ConfigError
            | ErrorCode::ConfigMissing
            | ErrorCode::ConfigInvalid
    )
}

fn elapsed_ms(since: Instant) -> u64 {
    millis(since.elapsed())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ABOUTME: Recommendation pipeline: validation, fingerprinting, extraction, fallback and orchestration
// ABOUTME: The service module composes the others; handlers only talk to the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Recovery of structured records from completion text
pub mod extractor;
/// Static fallback record
pub mod fallback;
/// Cache keys derived from normalized profiles
pub mod fingerprint;
/// Orchestrator state machine
pub mod service;
/// Submission range checks and normalization
pub mod validator;

pub use fallback::FallbackProvider;
pub use fingerprint::{fingerprint, Fingerprint};
pub use service::{
    FallbackReason, GenerationOptions, PipelineStage, RecommendationOutcome,
    RecommendationService, RecommendationSource, ServiceStats,
};

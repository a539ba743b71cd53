// ABOUTME: Error types for the recommendation server, re-exported from the core crate
// ABOUTME: AppError with HTTP mapping plus the pipeline error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! The definitions live in `nutriplan-core` so the data model and the server
//! share one taxonomy; this module keeps the `crate::errors` path stable.

pub use nutriplan_core::errors::{
    AppError, AppResult, AssetLoadError, ErrorCode, ErrorResponse, ExtractionError, PipelineError,
};

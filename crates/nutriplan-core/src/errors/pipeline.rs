// ABOUTME: Error taxonomy for the recommendation pipeline stages
// ABOUTME: Every variant is recoverable; the orchestrator maps each one to the fallback path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Error Types
//!
//! - `PipelineError` - the failure that ends a single recommendation request
//! - `ExtractionError` - no usable structured payload in a completion
//! - `AssetLoadError` - the fallback asset could not be loaded at startup

use std::path::PathBuf;
use thiserror::Error;

use super::AppError;

/// Failure of one recommendation request at some pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submission did not pass input validation
    #[error("profile validation failed: {}", messages.join("; "))]
    Validation {
        /// Advisory messages, one per rejected field
        messages: Vec<String>,
    },

    /// The completion service failed, timed out, or was unreachable
    #[error("generation failed: {0}")]
    Generation(#[source] AppError),

    /// The completion text held no usable structured payload
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// A step that cannot fail for well-formed profiles failed anyway
    #[error("internal pipeline failure: {0}")]
    Internal(#[source] AppError),
}

impl PipelineError {
    /// Short machine-friendly label used in logs and responses
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Generation(_) => "generation",
            Self::Extraction(_) => "extraction",
            Self::Internal(_) => "internal",
        }
    }
}

/// Failure to recover a recommendation record from raw completion text
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No brace-balanced span in the text parsed as a JSON object
    #[error("no structured payload found in completion")]
    NoPayload,

    /// The payload was found but could not be decoded into a record
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required top-level list is absent
    #[error("payload is missing required field '{0}'")]
    MissingField(&'static str),

    /// A list is present but empty
    #[error("payload field '{0}' has no entries")]
    EmptyList(&'static str),

    /// A top-level field has the wrong JSON type
    #[error("payload field '{0}' must be a list")]
    InvalidField(&'static str),
}

/// Failure to load the packaged fallback recommendation
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The asset could not be read
    #[error("failed to read fallback asset {path}: {source}")]
    Io {
        /// Asset location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The asset was read but does not match the record shape
    #[error("fallback asset {path} is malformed: {source}")]
    Malformed {
        /// Asset location
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

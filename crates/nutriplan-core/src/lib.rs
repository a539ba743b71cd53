// ABOUTME: Core types and constants for the Nutriplan recommendation service
// ABOUTME: Foundation crate with error handling, constants, and the profile/recommendation models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutriplan Core
//!
//! Foundation crate providing shared types and constants for the Nutriplan
//! meal and workout recommendation service. It performs no I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the pipeline error taxonomy
//! - **constants**: Validation ranges, cache defaults, and environment variable names
//! - **models**: Profile submissions, normalized profiles, and recommendation records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Profile and recommendation data models
pub mod models;

// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups validation limits, cache defaults, and environment configuration keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the domain that consumes them.

/// Cache capacity defaults
pub mod cache;

/// Environment variable names and their defaults
pub mod env_config;

/// Plausibility ranges for user-submitted profile values
pub mod limits;

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the recommendation server
    pub const NUTRIPLAN_SERVER: &str = "nutriplan-server";
}

// ABOUTME: Configuration module for the recommendation server
// ABOUTME: Environment-driven settings for the listener, completion service, cache and fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{GeminiConfig, LlmCallConfig, ServerConfig};

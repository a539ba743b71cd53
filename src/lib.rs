// ABOUTME: Main library entry point for the Nutriplan recommendation server
// ABOUTME: Validates profiles, caches generated plans and falls back to a static plan on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutriplan Server
//!
//! An HTTP service that turns a user's health and diet profile into a
//! structured meal and workout plan generated by a text-completion model.
//!
//! ## Architecture
//!
//! - **Recommendations**: validation, fingerprinting, extraction, fallback and
//!   the orchestrating service
//! - **Cache**: bounded FIFO store of generated plans keyed by fingerprint
//! - **LLM**: completion provider trait and the Gemini client
//! - **Routes / Server**: axum handlers and middleware
//! - **Config / Logging**: environment configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriplan_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Nutriplan configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Response cache for generated recommendations
pub mod cache;

/// Configuration management
pub mod config;

/// Unified error handling
pub mod errors;

/// Completion provider abstraction and clients
pub mod llm;

/// Logging configuration and structured events
pub mod logging;

/// Recommendation pipeline
pub mod recommendations;

/// Shared handler resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Data model shared with the core crate
pub mod models {
    pub use nutriplan_core::models::*;
}

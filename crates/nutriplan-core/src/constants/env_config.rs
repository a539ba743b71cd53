// ABOUTME: Environment variable names read at startup and their default values
// ABOUTME: Shared by the server configuration loader and its tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Credential for the Gemini completion service (required)
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Model identifier override
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Base URL override for the Gemini REST API
pub const GEMINI_API_BASE: &str = "GEMINI_API_BASE";

/// Bind address
pub const HOST: &str = "HOST";

/// Listen port
pub const HTTP_PORT: &str = "HTTP_PORT";

/// Maximum number of cached recommendations
pub const RECOMMENDATION_CACHE_CAPACITY: &str = "RECOMMENDATION_CACHE_CAPACITY";

/// Optional on-disk override for the static fallback recommendation
pub const FALLBACK_ASSET_PATH: &str = "FALLBACK_ASSET_PATH";

/// Completion call timeout in seconds
pub const LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";

/// Number of retries after a failed completion call
pub const LLM_MAX_RETRIES: &str = "LLM_MAX_RETRIES";

/// Initial backoff between retries in milliseconds
pub const LLM_RETRY_BACKOFF_MS: &str = "LLM_RETRY_BACKOFF_MS";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST API base URL
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Default completion timeout in seconds
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Default retry count (no retries)
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 0;

/// Default initial retry backoff in milliseconds
pub const DEFAULT_LLM_RETRY_BACKOFF_MS: u64 = 500;

// ABOUTME: Environment configuration for the recommendation server
// ABOUTME: Parses and validates environment variables; a missing API key aborts startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use nutriplan_core::constants::cache::DEFAULT_CACHE_MAX_ENTRIES;
use nutriplan_core::constants::env_config;
use nutriplan_core::constants::limits::MAX_GENERATION_RETRIES;
use tracing::{debug, info};

use crate::cache::CacheConfig;
use crate::recommendations::GenerationOptions;

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub http_port: u16,
    /// Completion service settings
    pub gemini: GeminiConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// On-disk fallback asset overriding the compiled-in one
    pub fallback_asset_path: Option<PathBuf>,
    /// Completion call tuning
    pub llm: LlmCallConfig,
}

/// Gemini client settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key (never logged)
    pub api_key: String,
    /// Model used for recommendations
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Timeout and retry policy for completion calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmCallConfig {
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Retries after the first failed call
    pub max_retries: u32,
    /// Initial retry backoff in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for LlmCallConfig {
    fn default() -> Self {
        Self {
            timeout_secs: env_config::DEFAULT_LLM_TIMEOUT_SECS,
            max_retries: env_config::DEFAULT_LLM_MAX_RETRIES,
            retry_backoff_ms: env_config::DEFAULT_LLM_RETRY_BACKOFF_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the process environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is missing or empty, or if any
    /// variable holds a value that does not parse or fails validation.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }

        let api_key = env::var(env_config::GEMINI_API_KEY)
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "{} must be set to start the server",
                    env_config::GEMINI_API_KEY
                )
            })?;

        let config = Self {
            host: env_var_or(env_config::HOST, env_config::DEFAULT_HOST),
            http_port: parse_env(env_config::HTTP_PORT, env_config::DEFAULT_HTTP_PORT)?,
            gemini: GeminiConfig {
                api_key,
                model: env_var_or(env_config::GEMINI_MODEL, env_config::DEFAULT_GEMINI_MODEL),
                base_url: env_var_or(
                    env_config::GEMINI_API_BASE,
                    env_config::DEFAULT_GEMINI_API_BASE,
                ),
            },
            cache: CacheConfig {
                max_entries: parse_env(
                    env_config::RECOMMENDATION_CACHE_CAPACITY,
                    DEFAULT_CACHE_MAX_ENTRIES,
                )?,
            },
            fallback_asset_path: env::var(env_config::FALLBACK_ASSET_PATH)
                .ok()
                .map(|path| path.trim().to_owned())
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            llm: LlmCallConfig {
                timeout_secs: parse_env(
                    env_config::LLM_TIMEOUT_SECS,
                    env_config::DEFAULT_LLM_TIMEOUT_SECS,
                )?,
                max_retries: parse_env(
                    env_config::LLM_MAX_RETRIES,
                    env_config::DEFAULT_LLM_MAX_RETRIES,
                )?,
                retry_backoff_ms: parse_env(
                    env_config::LLM_RETRY_BACKOFF_MS,
                    env_config::DEFAULT_LLM_RETRY_BACKOFF_MS,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(anyhow!("{} cannot be empty", env_config::GEMINI_API_KEY));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(anyhow!("{} cannot be empty", env_config::GEMINI_MODEL));
        }
        if self.cache.max_entries == 0 {
            return Err(anyhow!(
                "{} must be greater than zero",
                env_config::RECOMMENDATION_CACHE_CAPACITY
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(anyhow!(
                "{} must be greater than zero",
                env_config::LLM_TIMEOUT_SECS
            ));
        }
        if self.llm.max_retries > MAX_GENERATION_RETRIES {
            return Err(anyhow!(
                "{} must be at most {MAX_GENERATION_RETRIES}",
                env_config::LLM_MAX_RETRIES
            ));
        }
        Ok(())
    }

    /// Socket address string for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Generation options for the recommendation service
    #[must_use]
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            timeout: Duration::from_secs(self.llm.timeout_secs),
            max_retries: self.llm.max_retries,
            retry_backoff: Duration::from_millis(self.llm.retry_backoff_ms),
            model: Some(self.gemini.model.clone()),
            temperature: None,
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutriplan Server Configuration:\n\
             - Listen: {}\n\
             - Gemini Model: {}\n\
             - Gemini Endpoint: {}\n\
             - Cache Capacity: {}\n\
             - Fallback Asset: {}\n\
             - LLM Timeout: {}s\n\
             - LLM Retries: {} (backoff {}ms)",
            self.bind_address(),
            self.gemini.model,
            self.gemini.base_url,
            self.cache.max_entries,
            self.fallback_asset_path
                .as_deref()
                .map_or_else(|| "packaged".to_owned(), |path| path.display().to_string()),
            self.llm.timeout_secs,
            self.llm.max_retries,
            self.llm.retry_backoff_ms,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using the default only when it is unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Scripted completion providers, sample submissions and service builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutriplan_server`

use async_trait::async_trait;
use nutriplan_server::{
    cache::{memory::InMemoryCache, CacheConfig},
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    models::ProfileSubmission,
    recommendations::{FallbackProvider, GenerationOptions, RecommendationService},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Completion text as models tend to return it: prose around a fenced payload
pub const WRAPPED_COMPLETION: &str = r#"Sure! Here is a plan tailored to you.

```json
{
  "breakfast": [{"name": "Poha", "quantity": "1 plate", "calories": 250, "protein": "6 g", "carbs": "45 g", "fats": "5 g"}],
  "lunch": [{"name": "Rajma Chawal", "quantity": "1 plate", "calories": 480}],
  "dinner": ["Palak Paneer", "Roti"],
  "yoga": [{"name": "Tadasana", "duration": "5 min", "calories_burned": 15}],
  "workouts": [{"name": "Brisk Walk", "duration": "30 min", "calories_burned": 150}]
}
```

Stay hydrated {and consistent}!"#;

/// A valid submission as a browser form would send it
pub fn sample_submission() -> ProfileSubmission {
    ProfileSubmission::from_fields([
        ("age", "29"),
        ("gender", "male"),
        ("weight", "72.5"),
        ("height", "1.78"),
        ("veg_or_nonveg", "vegetarian"),
        ("disease", "none"),
        ("region", "Maharashtra"),
        ("allergies", "none"),
        ("foodtype", "Indian"),
    ])
}

/// Path of the packaged fallback asset
pub fn fallback_asset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fallback_recommendation.json")
}

enum Script {
    Reply(String),
    Fail,
    Hang(Duration),
    FailTimes { failures: usize, reply: String },
}

/// Completion provider with scripted behavior that counts its calls
pub struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedProvider {
    fn with_script(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// Always answers with `text`
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Self::with_script(Script::Reply(text.into()))
    }

    /// Always fails
    pub fn failing() -> Arc<Self> {
        Self::with_script(Script::Fail)
    }

    /// Answers only after `delay`
    pub fn hanging(delay: Duration) -> Arc<Self> {
        Self::with_script(Script::Hang(delay))
    }

    /// Fails `failures` times, then answers with `reply`
    pub fn failing_times(failures: usize, reply: impl Into<String>) -> Arc<Self> {
        Self::with_script(Script::FailTimes {
            failures,
            reply: reply.into(),
        })
    }

    /// Number of completion calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn response(text: &str) -> ChatResponse {
        ChatResponse {
            content: text.to_owned(),
            model: "scripted".to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = request.messages.last().map(|m| m.content.clone());

        match &self.script {
            Script::Reply(text) => Ok(Self::response(text)),
            Script::Fail => Err(AppError::external_service("scripted", "service unavailable")),
            Script::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(Self::response(WRAPPED_COMPLETION))
            }
            Script::FailTimes { failures, reply } => {
                if call < *failures {
                    Err(AppError::external_service("scripted", "transient failure"))
                } else {
                    Ok(Self::response(reply))
                }
            }
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Service over a fresh cache, the packaged fallback and the given provider
pub fn build_service(
    provider: Arc<dyn LlmProvider>,
    capacity: usize,
    options: GenerationOptions,
) -> (RecommendationService, Arc<InMemoryCache>) {
    init_test_logging();
    let cache = Arc::new(InMemoryCache::new(&CacheConfig {
        max_entries: capacity,
    }));
    let fallback = Arc::new(FallbackProvider::load(fallback_asset_path()));
    let service =
        RecommendationService::new(cache.clone(), provider, fallback).with_options(options);
    (service, cache)
}

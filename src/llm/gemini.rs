// ABOUTME: Google Gemini completion provider over the generateContent REST API
// ABOUTME: Configurable endpoint and model, with status-aware error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of `LlmProvider` for Google's Gemini models. The API key
//! travels in the `x-goog-api-key` header so it never appears in request URLs
//! or in transport error messages.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutriplan_server::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use nutriplan_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new("api-key").with_default_model("gemini-2.5-flash");
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a dinner")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use nutriplan_core::constants::env_config::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::errors::{AppError, ErrorCode};

const SERVICE_NAME: &str = "Gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini completion provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: DEFAULT_GEMINI_API_BASE.to_owned(),
            default_model: DEFAULT_GEMINI_MODEL.to_owned(),
        }
    }

    /// Point the provider at another endpoint (proxies, local test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Convert our message role to Gemini's role format
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn text_content(role: Option<String>, message: &ChatMessage) -> GeminiContent {
        GeminiContent {
            role,
            parts: vec![ContentPart {
                text: message.content.clone(),
            }],
        }
    }

    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let mut contents = Vec::with_capacity(request.messages.len());
        let mut system_instruction = None;

        for message in &request.messages {
            if message.role == MessageRole::System {
                // Gemini takes system text in a dedicated field
                system_instruction = Some(Self::text_content(None, message));
            } else {
                let role = Self::convert_role(message.role).to_owned();
                contents.push(Self::text_content(Some(role), message));
            }
        }

        let generation_config = (request.temperature.is_some() || request.max_tokens.is_some())
            .then_some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                candidate_count: 1,
            });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let parts = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| {
                AppError::external_service(SERVICE_NAME, "No content in Gemini response")
            })?;

        Ok(parts.iter().map(|part| part.text.as_str()).collect())
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map a non-success status to an error, preferring Gemini's own message
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Gemini quota exceeded: {message}"),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key: {message}"),
            ),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!("Gemini API error ({status}): {message}"),
            ),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Gemini request failed: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(
                SERVICE_NAME,
                format!("Failed to read response: {}", e.without_url()),
            )
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::external_service(
                    SERVICE_NAME,
                    format!("Failed to parse Gemini response: {e}"),
                )
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("Gemini API error: {}", error.message),
            ));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(chars = content.len(), "Received Gemini completion");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        // Listing models verifies both reachability and the key
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Gemini health check failed: {}", e.without_url()),
                )
            })?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

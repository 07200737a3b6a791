// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative model service client
//!
//! The model is stateless single-turn request/response; all conversational
//! context is serialized into the prompt by the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::GeneratorConfig;

use super::types::LlmError;

/// Trait for generative model backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single prompt and return the model's text response
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model name for logging
    fn model(&self) -> &str;
}

/// Client for a Gemini-shaped generateContent API
pub struct GeminiClient {
    config: GeneratorConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new generative model client
    pub fn new(config: GeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::NoApiKey)?;

        debug!(
            "Sending {} char prompt to {}",
            prompt.len(),
            self.config.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        timeout_ms: self.config.request_timeout_ms,
                    }
                } else {
                    LlmError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateResponse = response.json().await.map_err(|e| LlmError::ApiError {
            status: 0,
            message: format!("JSON parse error: {}", e),
        })?;

        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, serde::Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, serde::Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, serde::Deserialize)]
struct CandidatePart {
    text: String,
}

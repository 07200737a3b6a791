// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::EmbeddingConfig;

use super::types::StoreError;

/// Trait for embedding backends
///
/// The chunk store computes embeddings through this trait, so tests can
/// inject a deterministic double instead of calling the hosted service.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Texts to embed, in order
    ///
    /// # Returns
    /// One embedding vector per input text, in the same order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError>;

    /// Expected embedding dimensions
    fn dimensions(&self) -> usize;
}

/// Client for an OpenAI-shaped embeddings endpoint
pub struct HttpEmbedder {
    config: EmbeddingConfig,
    client: Client,
}

impl HttpEmbedder {
    /// Create a new embedding service client
    pub fn new(config: EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(StoreError::NoApiKey)?;

        debug!("Embedding {} texts with {}", texts.len(), self.config.model);

        let request = EmbedRequest {
            model: self.config.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::EmbeddingTimeout {
                        timeout_ms: self.config.request_timeout_ms,
                    }
                } else {
                    StoreError::EmbeddingApi {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::EmbeddingApi {
                status: status.as_u16(),
                message,
            });
        }

        let data: EmbedResponse = response.json().await.map_err(|e| StoreError::EmbeddingApi {
            status: 0,
            message: format!("JSON parse error: {}", e),
        })?;

        if data.data.len() != texts.len() {
            return Err(StoreError::EmbeddingCountMismatch {
                expected: texts.len(),
                actual: data.data.len(),
            });
        }

        let mut embeddings = Vec::with_capacity(data.data.len());
        for item in data.data {
            if item.embedding.len() != self.config.dimensions {
                return Err(StoreError::DimensionMismatch {
                    expected: self.config.dimensions,
                    actual: item.embedding.len(),
                });
            }
            embeddings.push(item.embedding);
        }

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}

#[derive(Debug, serde::Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedItem>,
}

#[derive(Debug, serde::Deserialize)]
struct EmbedItem {
    embedding: Vec<f32>,
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hosted document parsing service client
//!
//! Uploads a document and receives page-tagged text back. The service is
//! treated as a black box: malformed input and unreachability both surface
//! as a generic ingestion error, and no partial result is ever returned.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::debug;

use crate::config::ParserConfig;

use super::types::{DocumentPage, IngestError};

/// Trait for document parsing backends
///
/// The orchestrator only depends on this trait, so tests can inject a
/// double instead of calling the hosted service.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Parse a document into an ordered sequence of page-tagged text blocks
    ///
    /// # Arguments
    /// * `path` - Path to the document on disk
    ///
    /// # Returns
    /// Pages in document order, or an error if parsing fails. A failed
    /// parse is fatal to the current indexing attempt.
    async fn parse(&self, path: &Path) -> Result<Vec<DocumentPage>, IngestError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the parser is available (has API key, etc.)
    fn is_available(&self) -> bool;
}

/// Client for a hosted parsing service (LlamaParse-style API)
pub struct CloudParserClient {
    config: ParserConfig,
    client: Client,
}

impl CloudParserClient {
    /// Create a new parsing service client
    pub fn new(config: ParserConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl DocumentParser for CloudParserClient {
    async fn parse(&self, path: &Path) -> Result<Vec<DocumentPage>, IngestError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(IngestError::NoApiKey)?;

        let bytes = tokio::fs::read(path).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        debug!(
            "Uploading {} bytes to parsing service ({} workers)",
            bytes.len(),
            self.config.num_workers
        );

        let request = ParseRequest {
            content: encoded,
            language: self.config.language.clone(),
            num_workers: self.config.num_workers,
            split_by_page: true,
        };

        let response = self
            .client
            .post(format!("{}/parse", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IngestError::Timeout {
                        timeout_ms: self.config.request_timeout_ms,
                    }
                } else {
                    IngestError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IngestError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: ParseResponse = response
            .json()
            .await
            .map_err(|e| IngestError::MalformedResponse(e.to_string()))?;

        if data.pages.is_empty() {
            return Err(IngestError::MalformedResponse(
                "parsing service returned no pages".to_string(),
            ));
        }

        Ok(data
            .pages
            .into_iter()
            .map(|p| DocumentPage {
                page: p.page,
                text: p.text,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "cloud-parser"
    }

    fn is_available(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }
}

#[derive(Debug, serde::Serialize)]
struct ParseRequest {
    content: String,
    language: String,
    num_workers: u32,
    split_by_page: bool,
}

#[derive(Debug, serde::Deserialize)]
struct ParseResponse {
    pages: Vec<ParsedPage>,
}

#[derive(Debug, serde::Deserialize)]
struct ParsedPage {
    page: u32,
    text: String,
}

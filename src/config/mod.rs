// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the document Q&A pipeline
//!
//! All external service endpoints and tuning knobs are loaded from
//! environment variables, with a `.env` file honored when present.

use std::env;

use crate::ingestion::DEFAULT_MERGE_THRESHOLD;
use crate::retrieval::{DEFAULT_FALLBACK, DEFAULT_TOP_K};

/// Top-level configuration for the RAG pipeline
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Document parsing service configuration
    pub parser: ParserConfig,
    /// Embedding service configuration
    pub embedding: EmbeddingConfig,
    /// Generative model configuration
    pub generator: GeneratorConfig,
    /// Number of chunks fetched per question before keyword filtering
    pub retrieval_top_k: usize,
    /// Number of unfiltered chunks used when keyword filtering matches nothing
    pub retrieval_fallback: usize,
    /// Maximum keyword phrases requested from the query rewriter
    pub max_keywords: usize,
    /// Paragraph merge threshold in characters
    pub merge_threshold: usize,
}

/// Configuration for the hosted document parsing service
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// API key for the parsing service
    pub api_key: Option<String>,
    /// Base URL of the parsing service
    pub base_url: String,
    /// Document language hint sent with each parse request
    pub language: String,
    /// Parallel workers requested from the parsing service
    pub num_workers: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Configuration for the embedding service
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// API key for the embedding service
    pub api_key: Option<String>,
    /// Base URL of the embedding service
    pub base_url: String,
    /// Embedding model identifier
    pub model: String,
    /// Expected embedding dimensions
    pub dimensions: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Configuration for the generative model service
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key for the generative model service
    pub api_key: Option<String>,
    /// Base URL of the generative model service
    pub base_url: String,
    /// Model identifier (e.g. "gemini-2.5-flash")
    pub model: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl RagConfig {
    /// Load configuration, honoring a `.env` file if one exists
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            parser: ParserConfig {
                api_key: env::var("PARSE_API_KEY").ok(),
                base_url: env::var("PARSE_API_URL")
                    .unwrap_or_else(|_| "https://api.cloud.llamaindex.ai/api/parsing".to_string()),
                language: env::var("PARSE_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
                num_workers: env::var("PARSE_NUM_WORKERS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(4),
                request_timeout_ms: env::var("PARSE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120_000),
            },
            embedding: EmbeddingConfig {
                api_key: env::var("EMBEDDING_API_KEY").ok(),
                base_url: env::var("EMBEDDING_API_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                dimensions: env::var("EMBEDDING_DIMENSIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1536),
                request_timeout_ms: env::var("EMBEDDING_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30_000),
            },
            generator: GeneratorConfig {
                api_key: env::var("GEMINI_API_KEY").ok(),
                base_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".to_string()
                }),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                request_timeout_ms: env::var("GEMINI_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60_000),
            },
            retrieval_top_k: env::var("RETRIEVAL_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOP_K),
            retrieval_fallback: env::var("RETRIEVAL_FALLBACK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FALLBACK),
            max_keywords: env::var("MAX_KEYWORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            merge_threshold: env::var("MERGE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MERGE_THRESHOLD),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.embedding.dimensions == 0 {
            return Err("Embedding dimensions must be greater than 0".to_string());
        }
        if self.retrieval_top_k == 0 {
            return Err("Retrieval top-k must be greater than 0".to_string());
        }
        if self.retrieval_fallback > self.retrieval_top_k {
            return Err(format!(
                "Retrieval fallback ({}) cannot exceed top-k ({})",
                self.retrieval_fallback, self.retrieval_top_k
            ));
        }
        if self.merge_threshold == 0 {
            return Err("Merge threshold must be greater than 0".to_string());
        }
        if self.max_keywords == 0 {
            return Err("Max keywords must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

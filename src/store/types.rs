// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the chunk store

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entry held in the session chunk store
#[derive(Debug, Clone)]
pub struct StoredChunk {
    /// Identifier derived from session and position (`{session_id}_{index}`)
    pub id: String,
    /// Owning session identifier
    pub session_id: String,
    /// The text content of the chunk
    pub content: String,
    /// Source page number, if known
    pub page: Option<u32>,
    /// Embedding vector for similarity ranking
    pub embedding: Vec<f32>,
}

/// Result from a similarity-ranked retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredChunk {
    /// Chunk identifier
    pub id: String,
    /// The matched chunk content
    pub content: String,
    /// Source page number, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Cosine similarity to the query (higher is more similar)
    pub score: f32,
}

/// Errors that can occur in the chunk store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Embedding service returned an error
    #[error("Embedding API error: {status} - {message}")]
    EmbeddingApi {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Embedding request timed out
    #[error("Embedding timeout after {timeout_ms}ms")]
    EmbeddingTimeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Embedding count doesn't match the number of input texts
    #[error("Embedding count mismatch: expected {expected}, got {actual}")]
    EmbeddingCountMismatch {
        /// Number of texts sent
        expected: usize,
        /// Number of embeddings returned
        actual: usize,
    },

    /// Embedding dimensions don't match the configured dimensions
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimensions
        expected: usize,
        /// Dimensions of the returned vector
        actual: usize,
    },

    /// Embedding vector contains NaN or infinite values
    #[error("Invalid embedding values: contains NaN or Infinity")]
    InvalidEmbedding,

    /// No API key configured for the embedding service
    #[error("No API key configured for the embedding service")]
    NoApiKey,
}

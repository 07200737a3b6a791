// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for document ingestion

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One page of extracted text, as returned by the parsing service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// 1-based page number
    pub page: u32,
    /// Extracted text for this page
    pub text: String,
}

/// A bounded span of document text stored as one retrievable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// The text content of the chunk
    pub content: String,
    /// Source page number, if the parser reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Errors that can occur during document ingestion
#[derive(Debug, Error)]
pub enum IngestError {
    /// Parsing service rejected the document or returned an error
    #[error("Parse API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Parse request timed out
    #[error("Parse timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Parsing service returned a malformed response
    #[error("Malformed parse response: {0}")]
    MalformedResponse(String),

    /// No API key configured for the parsing service
    #[error("No API key configured for the parsing service")]
    NoApiKey,

    /// Failed to read the document from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Get user-friendly error message for session-level reporting
    pub fn user_message(&self) -> String {
        match self {
            IngestError::Io(_) => "Could not read the uploaded document".to_string(),
            _ => "Failed to parse/index the document. Please try again.".to_string(),
        }
    }
}

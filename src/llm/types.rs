// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for generative model calls

use thiserror::Error;

/// Errors that can occur when calling the generative model service
#[derive(Debug, Error)]
pub enum LlmError {
    /// API error from the model service
    #[error("Model API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Request timed out
    #[error("Model timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Model returned no usable text
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// No API key configured for the model service
    #[error("No API key configured for the model service")]
    NoApiKey,
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for session orchestration

use thiserror::Error;

use crate::ingestion::IngestError;
use crate::llm::LlmError;
use crate::store::StoreError;

use super::state::{IndexState, SessionEvent};

/// Errors surfaced by the session orchestrator
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session exists for the given identifier
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// Question submitted while no document is indexed
    #[error("No document indexed for session {0}")]
    NotIndexed(String),

    /// Event not valid in the current state
    #[error("Invalid transition: {event:?} in state {from:?}")]
    InvalidTransition {
        /// State the session was in
        from: IndexState,
        /// Event that was applied
        event: SessionEvent,
    },

    /// Document ingestion (parse) failed
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestError),

    /// Chunk store operation failed
    #[error("Chunk store error: {0}")]
    Store(#[from] StoreError),

    /// Generative model call failed
    #[error("Model error: {0}")]
    Llm(#[from] LlmError),
}

impl SessionError {
    /// Get user-friendly error message for presentation layers
    pub fn user_message(&self) -> String {
        match self {
            SessionError::UnknownSession(_) => "Session not found".to_string(),
            SessionError::NotIndexed(_) => {
                "Upload a document before asking questions".to_string()
            }
            SessionError::Ingestion(e) => e.user_message(),
            SessionError::Store(_) => {
                "Failed to parse/index the document. Please try again.".to_string()
            }
            SessionError::InvalidTransition { .. } | SessionError::Llm(_) => {
                "The request could not be processed. Please try again.".to_string()
            }
        }
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-session state and the indexing state machine
//!
//! Transitions are explicit: each event either yields a new state or an
//! error, never an ambient mutation.

use std::path::PathBuf;

use super::history::HistoryTurn;
use super::types::SessionError;

/// Indexing lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// No document indexed
    Empty,
    /// Parse + index in flight
    Indexing,
    /// Document indexed, questions accepted
    Indexed,
}

/// Events driving the indexing state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A document upload was received
    UploadReceived,
    /// Parse + index completed
    IndexingSucceeded,
    /// Parse or index failed
    IndexingFailed,
    /// The user requested a session clear
    ClearRequested,
}

impl IndexState {
    /// Apply an event, returning the next state or an error
    ///
    /// A re-upload over an indexed session restarts indexing; clearing is
    /// accepted from any state and always lands in `Empty`.
    pub fn transition(self, event: SessionEvent) -> Result<IndexState, SessionError> {
        match (self, event) {
            (IndexState::Empty, SessionEvent::UploadReceived) => Ok(IndexState::Indexing),
            (IndexState::Indexed, SessionEvent::UploadReceived) => Ok(IndexState::Indexing),
            (IndexState::Indexing, SessionEvent::IndexingSucceeded) => Ok(IndexState::Indexed),
            (IndexState::Indexing, SessionEvent::IndexingFailed) => Ok(IndexState::Empty),
            (_, SessionEvent::ClearRequested) => Ok(IndexState::Empty),
            (from, event) => Err(SessionError::InvalidTransition { from, event }),
        }
    }

    /// Whether question submission is accepted in this state
    pub fn accepts_questions(&self) -> bool {
        matches!(self, IndexState::Indexed)
    }
}

/// An isolated conversational + document context
#[derive(Debug)]
pub struct Session {
    /// Opaque unique token identifying this session
    pub id: String,
    /// Path of the uploaded document, while one is associated
    pub document_path: Option<PathBuf>,
    /// Append-only conversation history
    pub history: Vec<HistoryTurn>,
    /// Indexing lifecycle state
    pub state: IndexState,
}

impl Session {
    /// Create a fresh session in the `Empty` state
    pub fn new(id: String) -> Self {
        Self {
            id,
            document_path: None,
            history: Vec::new(),
            state: IndexState::Empty,
        }
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversation history types
//!
//! History is an append-only ordered sequence; ordering defines the
//! conversational context fed back to the generator. Turns are never
//! mutated, only appended and wholesale-cleared.

use serde::{Deserialize, Serialize};

/// Speaker role of a history turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Uppercase label used in prompt serialization
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// Who produced this turn
    pub role: Role,
    /// Turn text
    pub content: String,
}

impl HistoryTurn {
    /// Create a new turn
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

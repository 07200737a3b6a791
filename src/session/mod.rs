// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session state and orchestration for the document Q&A pipeline

mod history;
mod manager;
mod state;
mod types;

pub use history::{HistoryTurn, Role};
pub use manager::{SessionManager, INDEXED_CONFIRMATION};
pub use state::{IndexState, Session, SessionEvent};
pub use types::SessionError;

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session-scoped chunk storage for RAG
//!
//! Chunks are embedded through an external embedding service and held in
//! memory, tagged by session identifier. Every read, write and delete is
//! scoped by that tag; it is the only cross-session isolation mechanism.

mod embedder;
mod session_store;
mod types;

pub use embedder::{Embedder, HttpEmbedder};
pub use session_store::SessionChunkStore;
pub use types::{ScoredChunk, StoreError, StoredChunk};

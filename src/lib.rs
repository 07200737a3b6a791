// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod config;
pub mod ingestion;
pub mod llm;
pub mod retrieval;
pub mod session;
pub mod store;

// Re-export main types
pub use config::RagConfig;
pub use ingestion::{chunk_pages, Chunk, DocumentPage, DocumentParser, IngestError};
pub use llm::{ask_with_history, rewrite_query, GeminiClient, LlmError, TextGenerator};
pub use retrieval::{assemble_context, filter_by_keywords, retrieve_context};
pub use session::{
    HistoryTurn, IndexState, Role, Session, SessionError, SessionEvent, SessionManager,
};
pub use store::{Embedder, HttpEmbedder, ScoredChunk, SessionChunkStore, StoreError};

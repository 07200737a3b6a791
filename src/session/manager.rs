// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session orchestrator
//!
//! Ties the pipeline together per session: upload → parse → chunk →
//! embed+store, then per question rewrite → retrieve/filter → generate →
//! append history. One question runs to completion before the next is
//! accepted; the chunk store's session tag is the only cross-session
//! shared state.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RagConfig;
use crate::ingestion::{chunk_pages, CloudParserClient, DocumentParser};
use crate::llm::{
    ask_with_history, rewrite_query, summarize_text, GeminiClient, TextGenerator,
    SERVICE_BUSY_MESSAGE,
};
use crate::retrieval::retrieve_context;
use crate::store::{Embedder, HttpEmbedder, SessionChunkStore};

use super::history::{HistoryTurn, Role};
use super::state::{IndexState, Session, SessionEvent};
use super::types::SessionError;

/// Confirmation turn appended to history when indexing succeeds
pub const INDEXED_CONFIRMATION: &str = "Document indexed! Ask me anything.";

/// Orchestrates sessions over injected parsing, embedding and generation
/// backends
pub struct SessionManager {
    parser: Arc<dyn DocumentParser>,
    generator: Arc<dyn TextGenerator>,
    store: SessionChunkStore,
    config: RagConfig,
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    /// Create a manager with explicitly injected backends
    pub fn new(
        parser: Arc<dyn DocumentParser>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn TextGenerator>,
        config: RagConfig,
    ) -> Self {
        Self {
            parser,
            generator,
            store: SessionChunkStore::new(embedder),
            config,
            sessions: HashMap::new(),
        }
    }

    /// Create a manager wired to the hosted HTTP services
    pub fn from_config(config: RagConfig) -> Self {
        let parser = Arc::new(CloudParserClient::new(config.parser.clone()));
        let embedder = Arc::new(HttpEmbedder::new(config.embedding.clone()));
        let generator = Arc::new(GeminiClient::new(config.generator.clone()));
        Self::new(parser, embedder, generator, config)
    }

    /// Create a new session and return its identifier
    pub fn create_session(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Session::new(id.clone()));
        debug!("Created session {}", id);
        id
    }

    /// Parse and index a document for a session
    ///
    /// Any previous chunk set for the session is replaced. On success the
    /// session becomes `Indexed` and a confirmation turn is appended to
    /// history; on failure it returns to `Empty` and no partial index is
    /// committed.
    ///
    /// # Returns
    /// Number of chunks indexed
    pub async fn index_document(
        &mut self,
        session_id: &str,
        path: &Path,
    ) -> Result<usize, SessionError> {
        {
            let session = self.lookup_mut(session_id)?;
            session.state = session.state.transition(SessionEvent::UploadReceived)?;
            session.document_path = Some(path.to_path_buf());
        }

        let merge_threshold = self.config.merge_threshold;
        let parser = Arc::clone(&self.parser);

        let result: Result<usize, SessionError> = async {
            let pages = parser.parse(path).await?;
            let chunks = chunk_pages(&pages, merge_threshold);
            let count = self.store.index(session_id, &chunks).await?;
            Ok(count)
        }
        .await;

        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;

        match result {
            Ok(count) => {
                session.state = session.state.transition(SessionEvent::IndexingSucceeded)?;
                session
                    .history
                    .push(HistoryTurn::new(Role::Assistant, INDEXED_CONFIRMATION));
                info!(
                    "Session {} indexed {} chunks from {}",
                    session_id,
                    count,
                    path.display()
                );
                Ok(count)
            }
            Err(e) => {
                session.state = session.state.transition(SessionEvent::IndexingFailed)?;
                warn!("Indexing failed for session {}: {}", session_id, e);
                Err(e)
            }
        }
    }

    /// Answer one question for a session
    ///
    /// Accepted only in the `Indexed` state. The question is appended as a
    /// user turn, then rewrite → retrieve/filter → generate, and the
    /// answer is appended as an assistant turn. Failures past this point
    /// degrade to the fixed busy message; the conversation always
    /// advances by exactly one assistant turn.
    pub async fn ask(&mut self, session_id: &str, question: &str) -> Result<String, SessionError> {
        let top_k = self.config.retrieval_top_k;
        let fallback = self.config.retrieval_fallback;
        let max_keywords = self.config.max_keywords;
        let generator = Arc::clone(&self.generator);

        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        if !session.state.accepts_questions() {
            return Err(SessionError::NotIndexed(session_id.to_string()));
        }

        session.history.push(HistoryTurn::new(Role::User, question));

        let keywords = rewrite_query(generator.as_ref(), question, max_keywords).await;
        debug!(
            "Session {} rewrote question into {} keywords",
            session_id,
            keywords.len()
        );

        let context = match retrieve_context(
            &self.store,
            session_id,
            question,
            &keywords,
            top_k,
            fallback,
        )
        .await
        {
            Ok(context) => context,
            Err(e) => {
                warn!("Retrieval failed for session {}: {}", session_id, e);
                session
                    .history
                    .push(HistoryTurn::new(Role::Assistant, SERVICE_BUSY_MESSAGE));
                return Ok(SERVICE_BUSY_MESSAGE.to_string());
            }
        };

        let answer =
            ask_with_history(generator.as_ref(), &session.history, &context, question).await;
        session
            .history
            .push(HistoryTurn::new(Role::Assistant, answer.clone()));

        info!("Session {} answered one question", session_id);
        Ok(answer)
    }

    /// Summarize the indexed document in one model call
    pub async fn summarize(&self, session_id: &str) -> Result<String, SessionError> {
        let session = self.lookup(session_id)?;
        if !session.state.accepts_questions() {
            return Err(SessionError::NotIndexed(session_id.to_string()));
        }

        let combined = self.store.get_all(session_id).join("\n\n");
        Ok(summarize_text(self.generator.as_ref(), &combined).await?)
    }

    /// Clear a session: chunk store entries, history and temp file
    ///
    /// The temp file removal is best-effort; a missing file is not an
    /// error.
    pub fn clear(&mut self, session_id: &str) -> Result<(), SessionError> {
        let removed = self.store.clear(session_id);

        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;

        if let Some(path) = session.document_path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                debug!("Temp file removal failed for {}: {}", path.display(), e);
            }
        }

        session.history.clear();
        session.state = session.state.transition(SessionEvent::ClearRequested)?;

        info!("Cleared session {} ({} chunks removed)", session_id, removed);
        Ok(())
    }

    /// Conversation history for a session
    pub fn history(&self, session_id: &str) -> Result<&[HistoryTurn], SessionError> {
        Ok(&self.lookup(session_id)?.history)
    }

    /// Indexing state for a session
    pub fn state(&self, session_id: &str) -> Result<IndexState, SessionError> {
        Ok(self.lookup(session_id)?.state)
    }

    /// The chunk store owned by this manager
    pub fn store(&self) -> &SessionChunkStore {
        &self.store
    }

    fn lookup(&self, session_id: &str) -> Result<&Session, SessionError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    fn lookup_mut(&mut self, session_id: &str) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }
}

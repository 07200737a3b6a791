// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session-scoped chunk store with similarity-ranked retrieval
//!
//! One store instance serves all sessions; every operation is scoped by
//! the session identifier tag. Re-indexing a session deletes its old
//! chunks before any new ones are stored, so no stale chunks from a
//! prior document can remain under the same identifier.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::ingestion::Chunk;

use super::embedder::Embedder;
use super::types::{ScoredChunk, StoreError, StoredChunk};

/// In-memory chunk store, tag-scoped by session identifier
pub struct SessionChunkStore {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<HashMap<String, Vec<StoredChunk>>>,
}

impl SessionChunkStore {
    /// Create a new store backed by the given embedder
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Index chunks for a session, replacing any previous chunk set
    ///
    /// Existing chunks tagged with `session_id` are deleted first. Each new
    /// chunk gets an identifier derived from session and position.
    ///
    /// # Returns
    /// Number of chunks stored, or an error if embedding fails. On error
    /// the session is left with no indexed chunks (no partial index).
    pub async fn index(&self, session_id: &str, chunks: &[Chunk]) -> Result<usize, StoreError> {
        // Delete-before-add: the old chunk set must never survive a re-index
        self.entries
            .write()
            .expect("store lock poisoned")
            .remove(session_id);

        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(StoreError::EmbeddingCountMismatch {
                expected: chunks.len(),
                actual: embeddings.len(),
            });
        }

        let mut stored = Vec::with_capacity(chunks.len());
        for (i, (chunk, embedding)) in chunks.iter().zip(embeddings).enumerate() {
            validate_embedding(&embedding, self.embedder.dimensions())?;

            stored.push(StoredChunk {
                id: format!("{}_{}", session_id, i),
                session_id: session_id.to_string(),
                content: chunk.content.clone(),
                page: chunk.page,
                embedding,
            });
        }

        let count = stored.len();
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(session_id.to_string(), stored);

        info!("Indexed {} chunks for session {}", count, session_id);
        Ok(count)
    }

    /// Retrieve up to `k` chunks for a session, ranked by similarity
    ///
    /// The query text is embedded and chunks are ranked by cosine
    /// similarity against it, descending.
    pub async fn retrieve(
        &self,
        session_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        if self.count(session_id) == 0 {
            return Ok(Vec::new());
        }

        let query_texts = [query.to_string()];
        let query_embedding = self
            .embedder
            .embed(&query_texts)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::EmbeddingCountMismatch {
                expected: 1,
                actual: 0,
            })?;

        let entries = self.entries.read().expect("store lock poisoned");
        let chunks = match entries.get(session_id) {
            Some(chunks) => chunks,
            None => return Ok(Vec::new()),
        };

        let mut results: Vec<ScoredChunk> = chunks
            .iter()
            .map(|chunk| ScoredChunk {
                id: chunk.id.clone(),
                content: chunk.content.clone(),
                page: chunk.page,
                score: cosine_similarity(&query_embedding, &chunk.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);

        debug!(
            "Retrieved {} chunks for session {} (k={})",
            results.len(),
            session_id,
            k
        );
        Ok(results)
    }

    /// Get all chunk texts for a session, in indexing order
    pub fn get_all(&self, session_id: &str) -> Vec<String> {
        self.entries
            .read()
            .expect("store lock poisoned")
            .get(session_id)
            .map(|chunks| chunks.iter().map(|c| c.content.clone()).collect())
            .unwrap_or_default()
    }

    /// Delete all chunks tagged with `session_id`
    ///
    /// # Returns
    /// Number of chunks removed
    pub fn clear(&self, session_id: &str) -> usize {
        let removed = self
            .entries
            .write()
            .expect("store lock poisoned")
            .remove(session_id)
            .map(|chunks| chunks.len())
            .unwrap_or(0);

        if removed > 0 {
            info!("Cleared {} chunks for session {}", removed, session_id);
        }
        removed
    }

    /// Count of chunks stored for a session
    pub fn count(&self, session_id: &str) -> usize {
        self.entries
            .read()
            .expect("store lock poisoned")
            .get(session_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn validate_embedding(embedding: &[f32], expected_dims: usize) -> Result<(), StoreError> {
    if embedding.len() != expected_dims {
        return Err(StoreError::DimensionMismatch {
            expected: expected_dims,
            actual: embedding.len(),
        });
    }
    if embedding.iter().any(|v| v.is_nan() || v.is_infinite()) {
        return Err(StoreError::InvalidEmbedding);
    }
    Ok(())
}

/// Cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

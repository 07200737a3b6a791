// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval and keyword filtering
//!
//! Fetches the top-K chunks for a session, keeps those overlapping the
//! rewritten keywords, and assembles the context string fed to the
//! generator. When no chunk matches any keyword the first few unfiltered
//! chunks are used instead: retrieval never hands the generator empty
//! context if the store returned anything.

use tracing::debug;

use crate::store::{ScoredChunk, SessionChunkStore, StoreError};

/// Default number of chunks fetched per question
pub const DEFAULT_TOP_K: usize = 15;

/// Default number of unfiltered chunks kept when no keyword matches
pub const DEFAULT_FALLBACK: usize = 5;

/// Keep chunks containing at least one keyword, case-insensitively
///
/// If zero chunks survive, returns the first `fallback` chunks in their
/// original order. This is a precision-lowering fallback by design.
pub fn filter_by_keywords(
    chunks: Vec<ScoredChunk>,
    keywords: &[String],
    fallback: usize,
) -> Vec<ScoredChunk> {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let matched: Vec<ScoredChunk> = chunks
        .iter()
        .filter(|chunk| {
            let content = chunk.content.to_lowercase();
            lowered.iter().any(|k| !k.is_empty() && content.contains(k))
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        debug!(
            "No chunks matched {} keywords, falling back to first {}",
            keywords.len(),
            fallback
        );
        chunks.into_iter().take(fallback).collect()
    } else {
        matched
    }
}

/// Join chunk texts with blank-line separators
pub fn assemble_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Retrieve, filter and assemble the context for one question
///
/// # Arguments
/// * `store` - Session-scoped chunk store
/// * `session_id` - Owning session
/// * `question` - The question text, used as the similarity query
/// * `keywords` - Rewritten keyword phrases for filtering
/// * `top_k` - Number of chunks fetched before filtering
/// * `fallback` - Chunks kept when no keyword matches
pub async fn retrieve_context(
    store: &SessionChunkStore,
    session_id: &str,
    question: &str,
    keywords: &[String],
    top_k: usize,
    fallback: usize,
) -> Result<String, StoreError> {
    let retrieved = store.retrieve(session_id, question, top_k).await?;
    let kept = filter_by_keywords(retrieved, keywords, fallback);

    debug!(
        "Context for session {}: {} chunks kept",
        session_id,
        kept.len()
    );
    Ok(assemble_context(&kept))
}

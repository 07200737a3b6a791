// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query rewriting for document retrieval
//!
//! A question is rewritten into a short list of keyword phrases via the
//! generative model. Any failure (model error, non-JSON output) falls
//! back to a whitespace heuristic; rewriting never raises.

use tracing::debug;

use super::client::TextGenerator;
use super::prompt::build_rewrite_prompt;

/// Rewrite a question into at most `max_keywords` keyword phrases
///
/// # Arguments
/// * `generator` - Generative model backend
/// * `question` - The user's free-text question
/// * `max_keywords` - Maximum phrases to return
///
/// # Returns
/// Keyword phrases for retrieval filtering. This is the defined degraded
/// path on failure, not an exceptional one: it always returns.
pub async fn rewrite_query(
    generator: &dyn TextGenerator,
    question: &str,
    max_keywords: usize,
) -> Vec<String> {
    let prompt = build_rewrite_prompt(question, max_keywords);

    let response = match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            debug!("Query rewrite call failed ({}), using fallback", e);
            return fallback_keywords(question);
        }
    };

    match serde_json::from_str::<Vec<String>>(response.trim()) {
        Ok(mut phrases) => {
            phrases.retain(|p| !p.trim().is_empty());
            phrases.truncate(max_keywords);
            if phrases.is_empty() {
                fallback_keywords(question)
            } else {
                phrases
            }
        }
        Err(_) => {
            debug!("Query rewrite returned non-JSON output, using fallback");
            fallback_keywords(question)
        }
    }
}

/// Heuristic fallback: first 3 lowercase whitespace-split tokens
pub fn fallback_keywords(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .take(3)
        .map(|t| t.to_string())
        .collect()
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! History-aware answer generation

use tracing::warn;

use crate::session::HistoryTurn;

use super::client::TextGenerator;
use super::prompt::{build_answer_prompt, build_summary_prompt};
use super::types::LlmError;

/// Fixed user-facing message substituted when the model call fails
pub const SERVICE_BUSY_MESSAGE: &str = "Service busy. Please try again shortly.";

/// Answer a question against retrieved context and conversation history
///
/// Builds a single prompt from the system instruction, prior turns,
/// retrieved excerpts and the question, and sends one model request.
/// If the call fails the fixed busy message is returned instead: the
/// conversation must always advance by one assistant turn per question.
pub async fn ask_with_history(
    generator: &dyn TextGenerator,
    history: &[HistoryTurn],
    context: &str,
    question: &str,
) -> String {
    let prompt = build_answer_prompt(history, context, question);

    match generator.generate(&prompt).await {
        Ok(answer) => answer.trim().to_string(),
        Err(e) => {
            warn!("Answer generation failed: {}", e);
            SERVICE_BUSY_MESSAGE.to_string()
        }
    }
}

/// Summarize combined document text in one model call
///
/// Unlike question answering there is no conversation to keep advancing,
/// so model errors propagate to the caller.
pub async fn summarize_text(
    generator: &dyn TextGenerator,
    combined: &str,
) -> Result<String, LlmError> {
    let prompt = build_summary_prompt(combined);
    let summary = generator.generate(&prompt).await?;
    Ok(summary.trim().to_string())
}

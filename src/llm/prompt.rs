// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt assembly for the document Q&A conversation
//!
//! The model is stateless, so the full conversation (system instruction,
//! prior turns, retrieved excerpts, current question, output formatting
//! conventions) is serialized into a single prompt per request.

use crate::session::HistoryTurn;

/// Fixed system instruction for answer generation
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Use ONLY the provided excerpts to \
     answer thoroughly and conversationally. If the excerpts don't cover everything, say so and \
     offer to elaborate.";

/// Closing instruction describing output formatting conventions
const LIST_TABLE_INSTRUCTION: &str = "\n\nIf your answer is a list, use bullets:\n\
     - Item A\n- Item B\n\n\
     If a table fits, use ASCII tables:\n\
     | Col1 | Col2 |\n|------|------|\n| X    | Y    |\n";

/// Build the single-request answer prompt
///
/// Order: system instruction, prior history turns labeled by role, a label
/// introducing the retrieved excerpts plus the context, the current
/// question labeled as user, and the formatting instruction with the
/// answer cue.
pub fn build_answer_prompt(history: &[HistoryTurn], context: &str, question: &str) -> String {
    let mut lines = vec![format!("SYSTEM: {}", SYSTEM_PROMPT)];

    for turn in history {
        lines.push(format!("{}: {}", turn.role.label(), turn.content));
    }

    lines.push(format!(
        "ASSISTANT: Here are the relevant excerpts:\n{}",
        context
    ));
    lines.push(format!("USER: {}", question));
    lines.push(format!("ASSISTANT:{}\nAnswer:", LIST_TABLE_INSTRUCTION));

    lines.join("\n")
}

/// Build the query-rewrite prompt
pub fn build_rewrite_prompt(question: &str, max_keywords: usize) -> String {
    format!(
        "SYSTEM: Extract up to {} concise keyword phrases from the user question that would \
         best help search the document. Return them as a JSON list.\nQUESTION: {}",
        max_keywords, question
    )
}

/// Build a whole-document summary prompt
pub fn build_summary_prompt(combined: &str) -> String {
    format!(
        "SYSTEM: Summarize the following document excerpts concisely, covering the main \
         points in order.\nDOCUMENT:\n{}\nSUMMARY:",
        combined
    )
}

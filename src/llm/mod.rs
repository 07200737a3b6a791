// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative model access: query rewriting, prompt assembly and
//! history-aware answer generation

mod answer;
mod client;
mod prompt;
mod rewrite;
mod types;

pub use answer::{ask_with_history, summarize_text, SERVICE_BUSY_MESSAGE};
pub use client::{GeminiClient, TextGenerator};
pub use prompt::{build_answer_prompt, build_rewrite_prompt, build_summary_prompt};
pub use rewrite::{fallback_keywords, rewrite_query};
pub use types::LlmError;

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Paragraph-merge chunking for parsed documents
//!
//! Each page is split on blank-line boundaries, empty paragraphs are
//! discarded, and consecutive paragraphs are greedily merged while the
//! running buffer is below the merge threshold. Once the buffer reaches
//! the threshold it is flushed as a completed chunk and the next
//! paragraph starts a new one.

use super::types::{Chunk, DocumentPage};

/// Default paragraph merge threshold in characters
pub const DEFAULT_MERGE_THRESHOLD: usize = 200;

/// Chunk parsed pages into embedding-ready units
///
/// # Arguments
/// * `pages` - Page-tagged text blocks in document order
/// * `merge_threshold` - Buffer length (chars) at which a chunk is flushed
///
/// # Returns
/// Chunks in document order, each tagged with its source page number
pub fn chunk_pages(pages: &[DocumentPage], merge_threshold: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for page in pages {
        for merged in merge_paragraphs(&page.text, merge_threshold) {
            chunks.push(Chunk {
                content: merged,
                page: Some(page.page),
            });
        }
    }

    chunks
}

/// Split page text into paragraphs and greedily merge small ones
fn merge_paragraphs(text: &str, merge_threshold: usize) -> Vec<String> {
    let paras: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut merged: Vec<String> = Vec::new();
    let mut buf = String::new();

    for para in paras {
        if !buf.is_empty() && buf.chars().count() < merge_threshold {
            buf.push_str("\n\n");
            buf.push_str(para);
        } else {
            if !buf.is_empty() {
                merged.push(std::mem::take(&mut buf));
            }
            buf = para.to_string();
        }
    }

    if !buf.is_empty() {
        merged.push(buf);
    }

    merged
}

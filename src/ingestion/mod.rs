// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document ingestion: parsing service client and paragraph-merge chunking

mod chunker;
mod parser;
mod types;

pub use chunker::{chunk_pages, DEFAULT_MERGE_THRESHOLD};
pub use parser::{CloudParserClient, DocumentParser};
pub use types::{Chunk, DocumentPage, IngestError};

// Shared test doubles for the session pipeline tests

use std::path::Path;
use std::sync::{Arc, Once};

use async_trait::async_trait;

use docqa_node::config::{
    EmbeddingConfig, GeneratorConfig, ParserConfig, RagConfig,
};
use docqa_node::{
    DocumentPage, DocumentParser, Embedder, IngestError, LlmError, SessionManager, StoreError,
    TextGenerator,
};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once); output shows with --nocapture
fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// Parser double returning canned pages, or failing on demand
pub struct MockParser {
    pub pages: Vec<DocumentPage>,
    pub fail: bool,
}

impl MockParser {
    pub fn with_pages(pages: Vec<(u32, &str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(page, text)| DocumentPage {
                    page,
                    text: text.to_string(),
                })
                .collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl DocumentParser for MockParser {
    async fn parse(&self, _path: &Path) -> Result<Vec<DocumentPage>, IngestError> {
        if self.fail {
            Err(IngestError::ApiError {
                status: 500,
                message: "mock parse failure".to_string(),
            })
        } else {
            Ok(self.pages.clone())
        }
    }

    fn name(&self) -> &'static str {
        "mock-parser"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder double returning the same vector for every text
///
/// All similarity scores tie, so retrieval preserves indexing order
/// (the sort is stable), which makes fallback ordering observable.
pub struct ConstantEmbedder {
    pub dims: usize,
}

#[async_trait]
impl Embedder for ConstantEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        Ok(texts.iter().map(|_| vec![1.0; self.dims]).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

/// Generator double scripted per prompt kind
///
/// Rewrite prompts (marked by "QUESTION:") get `rewrite_response`; answer
/// and summary prompts get `answer_response`, the echoed prompt, or a
/// canned failure.
pub struct ScriptedGenerator {
    pub rewrite_response: Option<String>,
    pub answer_response: Option<String>,
    pub echo_prompt: bool,
}

impl ScriptedGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            rewrite_response: None,
            answer_response: Some(answer.to_string()),
            echo_prompt: false,
        }
    }

    pub fn echoing() -> Self {
        Self {
            rewrite_response: None,
            answer_response: None,
            echo_prompt: true,
        }
    }

    pub fn failing_answers() -> Self {
        Self {
            rewrite_response: None,
            answer_response: None,
            echo_prompt: false,
        }
    }

    pub fn with_rewrite(mut self, response: &str) -> Self {
        self.rewrite_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.contains("QUESTION:") {
            return self.rewrite_response.clone().ok_or(LlmError::EmptyResponse);
        }

        if self.echo_prompt {
            return Ok(prompt.to_string());
        }

        self.answer_response.clone().ok_or(LlmError::ApiError {
            status: 503,
            message: "mock generation failure".to_string(),
        })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Test configuration with local endpoints and small dimensions
pub fn test_config() -> RagConfig {
    RagConfig {
        parser: ParserConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost:9000".to_string(),
            language: "en".to_string(),
            num_workers: 4,
            request_timeout_ms: 1000,
        },
        embedding: EmbeddingConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost:9001".to_string(),
            model: "test-embed".to_string(),
            dimensions: 4,
            request_timeout_ms: 1000,
        },
        generator: GeneratorConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost:9002".to_string(),
            model: "test-gen".to_string(),
            request_timeout_ms: 1000,
        },
        retrieval_top_k: 15,
        retrieval_fallback: 5,
        max_keywords: 5,
        merge_threshold: 200,
    }
}

/// Build a manager over the given doubles
pub fn manager(
    parser: MockParser,
    generator: ScriptedGenerator,
) -> SessionManager {
    init_tracing();
    SessionManager::new(
        Arc::new(parser),
        Arc::new(ConstantEmbedder { dims: 4 }),
        Arc::new(generator),
        test_config(),
    )
}

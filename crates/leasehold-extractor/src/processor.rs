//! Per-document pipeline: extract text, prompt the model, parse, persist

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_model_response;
use crate::prompt::PromptBuilder;
use crate::types::ProcessOutcome;
use leasehold_domain::traits::{LlmProvider, RecordStore, TextExtractor};
use leasehold_domain::{AgreementRecord, Document, ExtractionPrompt};
use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns one agreement document into one stored record
///
/// Text extraction and the model call are blocking operations; they run on
/// tokio's blocking pool so the processor can be awaited from async code.
pub struct DocumentProcessor<T, L, S>
where
    T: TextExtractor,
    L: LlmProvider,
    S: RecordStore,
{
    text_extractor: Arc<T>,
    llm_provider: Arc<L>,
    store: Arc<Mutex<S>>,
    config: ExtractorConfig,
}

impl<T, L, S> DocumentProcessor<T, L, S>
where
    T: TextExtractor + Send + Sync + 'static,
    L: LlmProvider + Send + Sync + 'static,
    S: RecordStore,
    T::Error: Display,
    L::Error: Display,
    S::Error: Display,
{
    /// Create a new DocumentProcessor
    pub fn new(text_extractor: T, llm_provider: L, store: S, config: ExtractorConfig) -> Self {
        Self {
            text_extractor: Arc::new(text_extractor),
            llm_provider: Arc::new(llm_provider),
            store: Arc::new(Mutex::new(store)),
            config,
        }
    }

    /// Shared handle to the record store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Model used for generation
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Process the document at `path`, choosing the format from its extension
    pub async fn process_path(&self, path: &Path) -> Result<ProcessOutcome, ExtractorError> {
        let document = Document::from_path(path)
            .ok_or_else(|| ExtractorError::UnsupportedDocument(path.display().to_string()))?;
        self.process(&document).await
    }

    /// Process one document and upsert its terms
    pub async fn process(&self, document: &Document) -> Result<ProcessOutcome, ExtractorError> {
        let text = self.extract_text(document).await?;
        if text.trim().is_empty() {
            warn!("No text extracted from {}", document);
        }
        debug!("Extracted {} chars from {}", text.len(), document);

        let prompt = PromptBuilder::new(text.as_str())
            .with_max_tokens(self.config.max_output_tokens)
            .with_temperature(self.config.temperature)
            .build();
        debug!("Prompt length: {} chars", prompt.char_len());

        let response = timeout(self.config.request_timeout(), self.call_llm(prompt))
            .await
            .map_err(|_| ExtractorError::Timeout(self.config.request_timeout_secs))??;
        debug!("LLM response length: {} chars", response.len());

        let parsed = parse_model_response(&response)?;
        debug!("Scratchpad length: {} chars", parsed.reasoning.len());

        let record = AgreementRecord::new(document.id(), parsed.terms);
        self.persist(record.clone())?;
        info!("Inserted terms of the rental agreement - {}", document);

        Ok(ProcessOutcome {
            record,
            format: document.format(),
            reasoning: parsed.reasoning,
            text_length: text.chars().count(),
            model_name: self.model_name().to_string(),
        })
    }

    /// Run the text extractor on the blocking pool
    async fn extract_text(&self, document: &Document) -> Result<String, ExtractorError> {
        let extractor = Arc::clone(&self.text_extractor);
        let document = document.clone();

        tokio::task::spawn_blocking(move || {
            extractor
                .extract_text(&document)
                .map_err(|e| ExtractorError::Extraction(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Extraction(format!("Task join error: {}", e)))?
    }

    /// Call the LLM provider on the blocking pool
    async fn call_llm(&self, prompt: ExtractionPrompt) -> Result<String, ExtractorError> {
        let provider = Arc::clone(&self.llm_provider);

        tokio::task::spawn_blocking(move || {
            provider
                .generate(&prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }

    fn persist(&self, record: AgreementRecord) -> Result<(), ExtractorError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| ExtractorError::Store(format!("Store lock error: {}", e)))?;
        store
            .upsert_record(record)
            .map_err(|e| ExtractorError::Store(e.to_string()))
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the three
//! external capabilities it depends on. Infrastructure implementations live
//! in other crates, so the pipeline can run against substitutes in tests.

use crate::{AgreementRecord, Document, ExtractionPrompt};

/// Trait for producing raw text from a document
///
/// Implemented by the infrastructure layer (leasehold-documents)
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract all text from the document, dispatching on its format
    fn extract_text(&self, document: &Document) -> Result<String, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (leasehold-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send the prompt and return the model's generated text
    fn generate(&self, prompt: &ExtractionPrompt) -> Result<String, Self::Error>;

    /// Identifier of the model this provider calls
    fn model_name(&self) -> &str;
}

/// Trait for persisting agreement records
///
/// Implemented by the infrastructure layer (leasehold-store)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Insert the record, replacing any record with the same `agreement_id`
    fn upsert_record(&mut self, record: AgreementRecord) -> Result<(), Self::Error>;

    /// Get a record by agreement id
    fn get_record(&self, agreement_id: &str) -> Result<Option<AgreementRecord>, Self::Error>;

    /// List all records ordered by agreement id
    fn list_records(&self) -> Result<Vec<AgreementRecord>, Self::Error>;

    /// Delete a record, returning whether it existed
    fn delete_record(&mut self, agreement_id: &str) -> Result<bool, Self::Error>;
}

//! Leasehold Extractor
//!
//! Turns rental agreement documents into structured records of ten terms.
//!
//! # Architecture
//!
//! ```text
//! Document → TextExtractor → PromptBuilder → LlmProvider → parser → RecordStore
//! ```
//!
//! `DocumentProcessor` runs that pipeline for one document. `BatchDriver`
//! runs it for every entry of a directory, one document at a time, and
//! collects failures into a `BatchReport` instead of stopping.
//!
//! # Example Usage
//!
//! ```no_run
//! use leasehold_extractor::{BatchDriver, DocumentProcessor, ExtractorConfig};
//! use leasehold_documents::DocumentReader;
//! use leasehold_llm::MockProvider;
//! use leasehold_store::SqliteStore;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = DocumentProcessor::new(
//!     DocumentReader::new(),
//!     MockProvider::new("<output>{}</output>"),
//!     SqliteStore::new("leasehold.db")?,
//!     ExtractorConfig::default(),
//! );
//!
//! let report = BatchDriver::new(processor).run(Path::new("agreements")).await?;
//! println!("Stored: {}", report.stored_count());
//! println!("Failed: {}", report.failure_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod parser;
mod processor;
mod prompt;
mod tag;
mod types;


pub use batch::{list_documents, BatchDriver, DirectoryListing};
pub use config::ExtractorConfig;
pub use error::{ExtractorError, FailureKind};
pub use parser::{parse_model_response, ParsedResponse};
pub use processor::DocumentProcessor;
pub use prompt::{PromptBuilder, AGREEMENT_TAG, OUTPUT_TAG, SCRATCHPAD_TAG};
pub use tag::extract_tag;
pub use types::{BatchReport, DocumentReport, DocumentStatus, ProcessOutcome};

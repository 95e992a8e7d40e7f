//! Leasehold Domain Layer
//!
//! Core types and trait boundaries for the rental agreement pipeline.
//! This crate has no external dependencies; infrastructure implementations
//! (text extraction, LLM providers, record storage) live in other crates.
//!
//! ## Key Concepts
//!
//! - **Document**: a lease file on disk plus its format (PDF or Word)
//! - **Extraction Prompt**: the structured request sent to an LLM
//! - **Rental Terms**: the ten fields extracted from one agreement
//! - **Agreement Record**: rental terms keyed by the source document path
//!
//! ## Architecture
//!
//! ```text
//! Document → TextExtractor → ExtractionPrompt → LlmProvider → RentalTerms → RecordStore
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod prompt;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use document::{Document, DocumentFormat};
pub use prompt::{ChatMessage, ExtractionPrompt, Role};
pub use record::{AgreementRecord, RentalTerms, TermField};

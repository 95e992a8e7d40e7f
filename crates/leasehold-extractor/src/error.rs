//! Error types for the Extractor

use std::fmt;
use thiserror::Error;

/// Classification of a per-document failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Text could not be extracted from the document
    Extraction,
    /// The inference call failed or timed out
    Generation,
    /// The model response did not follow the required output format
    FormatCompliance,
    /// The record could not be written to the store
    Persistence,
    /// The document extension is neither `.pdf` nor `.docx`
    Unsupported,
}

impl FailureKind {
    /// Stable lowercase name, used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Extraction => "extraction",
            FailureKind::Generation => "generation",
            FailureKind::FormatCompliance => "format_compliance",
            FailureKind::Persistence => "persistence",
            FailureKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while processing agreements
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document extension is not supported
    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    /// Text extraction error
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Generation did not finish in time
    #[error("Generation timeout after {0}s")]
    Timeout(u64),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Output section is valid JSON but has the wrong shape
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    /// Output object lacks required fields
    #[error("Missing fields in output: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Record store error
    #[error("Store error: {0}")]
    Store(String),

    /// Source directory could not be listed
    #[error("Source directory error: {0}")]
    SourceDirectory(String),
}

impl ExtractorError {
    /// Failure kind for per-document errors
    ///
    /// Returns `None` for errors that concern the whole batch rather than a
    /// single document.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ExtractorError::UnsupportedDocument(_) => Some(FailureKind::Unsupported),
            ExtractorError::Extraction(_) => Some(FailureKind::Extraction),
            ExtractorError::Llm(_) | ExtractorError::Timeout(_) => Some(FailureKind::Generation),
            ExtractorError::JsonParse(_)
            | ExtractorError::InvalidFormat(_)
            | ExtractorError::MissingFields(_) => Some(FailureKind::FormatCompliance),
            ExtractorError::Store(_) => Some(FailureKind::Persistence),
            ExtractorError::SourceDirectory(_) => None,
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

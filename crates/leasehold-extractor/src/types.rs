//! Outcome and report types for agreement processing

use crate::error::FailureKind;
use chrono::{DateTime, Local};
use leasehold_domain::{AgreementRecord, DocumentFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Result of processing a single agreement
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// The record written to the store
    pub record: AgreementRecord,

    /// Format the text was extracted from
    pub format: DocumentFormat,

    /// Model reasoning from the `<scratchpad>` section
    pub reasoning: String,

    /// Number of characters extracted from the document
    pub text_length: usize,

    /// Name of the LLM model used
    pub model_name: String,
}

/// Status of one document in a batch
#[derive(Debug, Clone)]
pub enum DocumentStatus {
    /// Terms were extracted and stored
    Stored(ProcessOutcome),

    /// Processing stopped with an error
    Failed {
        /// Failure classification
        kind: FailureKind,
        /// Error message
        message: String,
    },
}

/// Per-document entry of a batch report
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Path of the document
    pub path: PathBuf,

    /// Wall-clock time spent on the document
    pub elapsed: Duration,

    /// What happened
    pub status: DocumentStatus,
}

impl DocumentReport {
    /// Whether the document's terms were stored
    pub fn is_stored(&self) -> bool {
        matches!(self.status, DocumentStatus::Stored(_))
    }
}

/// Summary of a batch run over a source directory
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Directory that was processed
    pub source_dir: PathBuf,

    /// Local time the batch started
    pub started_at: DateTime<Local>,

    /// Total wall-clock time
    pub elapsed: Duration,

    /// Documents attempted, in processing order
    pub documents: Vec<DocumentReport>,

    /// Entries that were not attempted (directories, hidden files)
    pub skipped: Vec<PathBuf>,

    /// True when the batch stopped early at a failure
    pub halted: bool,
}

impl BatchReport {
    /// Number of documents whose terms were stored
    pub fn stored_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_stored()).count()
    }

    /// Number of documents that failed
    pub fn failure_count(&self) -> usize {
        self.documents.len() - self.stored_count()
    }

    /// Failed documents with their kind and message
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, FailureKind, &str)> + '_ {
        self.documents.iter().filter_map(|d| match &d.status {
            DocumentStatus::Failed { kind, message } => Some((&d.path, *kind, message.as_str())),
            DocumentStatus::Stored(_) => None,
        })
    }

    /// True when every attempted document was stored
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0 && !self.halted
    }
}

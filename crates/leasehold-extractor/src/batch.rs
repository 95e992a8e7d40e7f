//! Sequential processing of every agreement in a directory

use crate::error::{ExtractorError, FailureKind};
use crate::processor::DocumentProcessor;
use crate::types::{BatchReport, DocumentReport, DocumentStatus};
use chrono::Local;
use leasehold_domain::traits::{LlmProvider, RecordStore, TextExtractor};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Entries of a source directory, split by whether they will be attempted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Regular, non-hidden files sorted by path
    pub documents: Vec<PathBuf>,
    /// Directories and hidden entries
    pub skipped: Vec<PathBuf>,
}

/// List the entries of `source_dir` (non-recursive)
///
/// Hidden entries are skipped the way a `*` glob skips them. Files with any
/// extension are listed; unsupported ones fail later with their own kind.
pub fn list_documents(source_dir: &Path) -> Result<DirectoryListing, ExtractorError> {
    let entries = fs::read_dir(source_dir).map_err(|e| {
        ExtractorError::SourceDirectory(format!("{}: {}", source_dir.display(), e))
    })?;

    let mut listing = DirectoryListing::default();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ExtractorError::SourceDirectory(format!("{}: {}", source_dir.display(), e))
        })?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');

        if hidden || path.is_dir() {
            listing.skipped.push(path);
        } else {
            listing.documents.push(path);
        }
    }

    listing.documents.sort();
    listing.skipped.sort();
    Ok(listing)
}

/// Drives a `DocumentProcessor` over a source directory
///
/// Documents are processed one at a time in path order. A failure is
/// recorded against its document and the batch moves on, unless the
/// processor's config sets `fail_fast`.
pub struct BatchDriver<T, L, S>
where
    T: TextExtractor,
    L: LlmProvider,
    S: RecordStore,
{
    processor: DocumentProcessor<T, L, S>,
}

impl<T, L, S> BatchDriver<T, L, S>
where
    T: TextExtractor + Send + Sync + 'static,
    L: LlmProvider + Send + Sync + 'static,
    S: RecordStore,
    T::Error: Display,
    L::Error: Display,
    S::Error: Display,
{
    /// Create a new BatchDriver
    pub fn new(processor: DocumentProcessor<T, L, S>) -> Self {
        Self { processor }
    }

    /// The wrapped processor
    pub fn processor(&self) -> &DocumentProcessor<T, L, S> {
        &self.processor
    }

    /// Process every document in `source_dir`
    ///
    /// Only a listing failure is returned as an error; per-document failures
    /// are part of the report.
    pub async fn run(&self, source_dir: &Path) -> Result<BatchReport, ExtractorError> {
        let started_at = Local::now();
        let batch_start = Instant::now();
        info!("Start time of agreement processing: {}", started_at);

        let listing = list_documents(source_dir)?;
        for path in &listing.skipped {
            warn!("Skipping {}", path.display());
        }
        info!(
            "Found {} documents in {}",
            listing.documents.len(),
            source_dir.display()
        );

        let mut documents = Vec::with_capacity(listing.documents.len());
        let mut halted = false;

        for path in listing.documents {
            let start = Instant::now();
            let result = self.processor.process_path(&path).await;
            let elapsed = start.elapsed();
            info!("Time taken to process {}: {:?}", path.display(), elapsed);

            let status = match result {
                Ok(outcome) => DocumentStatus::Stored(outcome),
                Err(e) => {
                    // Batch-level errors never come out of process_path
                    let kind = e.kind().unwrap_or(FailureKind::Extraction);
                    warn!("Failed to process {} ({}): {}", path.display(), kind, e);
                    DocumentStatus::Failed {
                        kind,
                        message: e.to_string(),
                    }
                }
            };

            let failed = matches!(status, DocumentStatus::Failed { .. });
            documents.push(DocumentReport {
                path,
                elapsed,
                status,
            });

            if failed && self.processor.config().fail_fast {
                warn!("Stopping batch after first failure");
                halted = true;
                break;
            }
        }

        let report = BatchReport {
            source_dir: source_dir.to_path_buf(),
            started_at,
            elapsed: batch_start.elapsed(),
            documents,
            skipped: listing.skipped,
            halted,
        };

        info!(
            "Batch complete: {} stored, {} failed, {} skipped",
            report.stored_count(),
            report.failure_count(),
            report.skipped.len()
        );
        for (path, kind, message) in report.failures() {
            warn!("Failed: {} [{}] {}", path.display(), kind, message);
        }

        Ok(report)
    }
}

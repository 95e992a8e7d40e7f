//! Leasehold Document Text Extraction
//!
//! Implements the `TextExtractor` trait from `leasehold-domain` for the two
//! supported lease formats.
//!
//! # Extractors
//!
//! - `PdfTextExtractor`: page-by-page extraction via `lopdf`
//! - `DocxTextExtractor`: Office Open XML parts read from the zip archive
//! - `DocumentReader`: dispatches on `Document::format()`
//!
//! # Examples
//!
//! ```no_run
//! use leasehold_documents::DocumentReader;
//! use leasehold_domain::traits::TextExtractor;
//! use leasehold_domain::Document;
//!
//! let reader = DocumentReader::new();
//! let document = Document::from_path("agreements/lease.pdf").unwrap();
//! let text = reader.extract_text(&document).unwrap();
//! println!("{} chars", text.len());
//! ```

#![warn(missing_docs)]

pub mod docx;
pub mod pdf;

use leasehold_domain::traits::TextExtractor;
use leasehold_domain::{Document, DocumentFormat};
use thiserror::Error;
use tracing::debug;

pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// DOCX zip container could not be opened
    #[error("Archive error: {0}")]
    Archive(String),

    /// Required part missing from the DOCX archive
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// DOCX part is not well-formed XML
    #[error("XML error: {0}")]
    Xml(String),
}

/// Text extractor that picks the extraction path from the document format
///
/// The format comes from the file extension only, so a `.pdf` file is always
/// read as a PDF regardless of its actual contents.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    pdf: PdfTextExtractor,
    docx: DocxTextExtractor,
}

impl DocumentReader {
    /// Create a reader with default extractors
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextExtractor for DocumentReader {
    type Error = DocumentError;

    fn extract_text(&self, document: &Document) -> Result<String, Self::Error> {
        debug!("Extracting {} text from {}", document.format(), document);
        match document.format() {
            DocumentFormat::Pdf => self.pdf.extract_file(document.path()),
            DocumentFormat::Docx => self.docx.extract_file(document.path()),
        }
    }
}

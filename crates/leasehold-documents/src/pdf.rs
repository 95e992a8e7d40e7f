//! PDF text extraction
//!
//! Pages are extracted one at a time and concatenated in page order with no
//! separator. A page that yields no text contributes the empty string.

use crate::DocumentError;
use lopdf::Document as PdfDocument;
use std::path::Path;
use tracing::{debug, warn};

/// Extracts text from PDF files using `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new PDF extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page of the PDF at `path`
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Pdf` if the file cannot be parsed as a PDF.
    /// Individual pages that fail to extract are logged and treated as empty.
    pub fn extract_file(&self, path: &Path) -> Result<String, DocumentError> {
        let doc = PdfDocument::load(path)
            .map_err(|e| DocumentError::Pdf(format!("{}: {}", path.display(), e)))?;
        Ok(Self::extract_pages(&doc))
    }

    /// Extract the text of every page of an in-memory PDF
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        let doc = PdfDocument::load_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;
        Ok(Self::extract_pages(&doc))
    }

    fn extract_pages(doc: &PdfDocument) -> String {
        let pages = doc.get_pages();
        debug!("PDF has {} page(s)", pages.len());

        concat_pages(pages.keys().map(|page_num| {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("No extractable text on page {}: {}", page_num, e);
                    None
                }
            }
        }))
    }
}

/// Concatenate per-page text, treating missing pages as empty
pub fn concat_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    pages.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_pages_in_order() {
        let pages = vec![Some("Page one. ".to_string()), Some("Page two.".to_string())];
        assert_eq!(concat_pages(pages), "Page one. Page two.");
    }

    #[test]
    fn test_single_empty_page_yields_empty_text() {
        assert_eq!(concat_pages(vec![None]), "");
        assert_eq!(concat_pages(vec![Some(String::new())]), "");
    }

    #[test]
    fn test_empty_page_in_the_middle() {
        let pages = vec![Some("A".to_string()), None, Some("C".to_string())];
        assert_eq!(concat_pages(pages), "AC");
    }

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let extractor = PdfTextExtractor::new();
        let result = extractor.extract_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(DocumentError::Pdf(_))));
    }
}

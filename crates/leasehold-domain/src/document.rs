//! Document module - a lease file awaiting extraction

use std::fmt;
use std::path::{Path, PathBuf};

/// Source format of a lease document
///
/// The format decides which text extraction path is used. It is derived from
/// the file extension alone, never from the file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Office Open XML word-processing document (`.docx`)
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a path's extension (case-insensitive)
    ///
    /// Returns `None` for any extension other than `.pdf` or `.docx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use leasehold_domain::DocumentFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(DocumentFormat::from_path(Path::new("lease.PDF")), Some(DocumentFormat::Pdf));
    /// assert_eq!(DocumentFormat::from_path(Path::new("lease.docx")), Some(DocumentFormat::Docx));
    /// assert_eq!(DocumentFormat::from_path(Path::new("notes.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    /// Canonical file extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rental agreement file discovered in the source directory
///
/// Documents are immutable once created and consumed once per batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    format: DocumentFormat,
}

impl Document {
    /// Create a document with an explicit format
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Create a document, detecting the format from the extension
    ///
    /// Returns `None` when the extension is not a supported format.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    /// Path of the document on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format used to select the text extraction path
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Identity used as the storage key for this document
    ///
    /// This is the path exactly as it was discovered, so reprocessing the same
    /// path always targets the same record.
    pub fn id(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("/leases/a.pdf")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("/leases/b.docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("/leases/B.DocX")),
            Some(DocumentFormat::Docx)
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        assert_eq!(DocumentFormat::from_path(Path::new("lease.doc")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("lease.txt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("lease")), None);
        assert_eq!(DocumentFormat::from_path(Path::new(".pdf")), None);
    }

    #[test]
    fn test_document_id_is_path() {
        let doc = Document::from_path("/home/agreements/lease-a.pdf").unwrap();
        assert_eq!(doc.id(), "/home/agreements/lease-a.pdf");
        assert_eq!(doc.format(), DocumentFormat::Pdf);
        assert_eq!(doc.to_string(), "/home/agreements/lease-a.pdf");
    }

    #[test]
    fn test_explicit_format_ignores_extension() {
        let doc = Document::new("/tmp/scan.bin", DocumentFormat::Pdf);
        assert_eq!(doc.format(), DocumentFormat::Pdf);
        assert_eq!(doc.path(), Path::new("/tmp/scan.bin"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: format detection depends only on the extension
        #[test]
        fn test_format_depends_on_extension_only(stem in "[a-zA-Z0-9_ -]{1,24}") {
            let pdf = PathBuf::from(format!("{}.pdf", stem));
            let docx = PathBuf::from(format!("{}.docx", stem));
            let other = PathBuf::from(format!("{}.txt", stem));

            prop_assert_eq!(DocumentFormat::from_path(&pdf), Some(DocumentFormat::Pdf));
            prop_assert_eq!(DocumentFormat::from_path(&docx), Some(DocumentFormat::Docx));
            prop_assert_eq!(DocumentFormat::from_path(&other), None);
        }
    }
}

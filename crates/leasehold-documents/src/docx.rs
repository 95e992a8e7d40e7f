//! DOCX text extraction
//!
//! DOCX files are ZIP archives containing XML files in Office Open XML
//! format. The body lives in `word/document.xml`; headers and footers live in
//! `word/header*.xml` and `word/footer*.xml`. Text is emitted as headers,
//! body, then footers, with one line per paragraph.

use crate::DocumentError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts plain text from Word documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxTextExtractor;

impl DocxTextExtractor {
    /// Create a new DOCX extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract all text from the DOCX file at `path`
    pub fn extract_file(&self, path: &Path) -> Result<String, DocumentError> {
        let file = File::open(path)?;
        self.extract_reader(file)
    }

    /// Extract all text from an in-memory DOCX
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        self.extract_reader(Cursor::new(bytes))
    }

    fn extract_reader<R: Read + Seek>(&self, reader: R) -> Result<String, DocumentError> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| DocumentError::Archive(format!("Failed to open DOCX archive: {}", e)))?;

        let headers = part_names(&archive, "word/header");
        let footers = part_names(&archive, "word/footer");

        let mut text = String::new();
        for name in &headers {
            text.push_str(&xml_to_text(&read_part(&mut archive, name)?)?);
        }

        let body = read_part(&mut archive, DOCUMENT_PART)?;
        text.push_str(&xml_to_text(&body)?);

        for name in &footers {
            text.push_str(&xml_to_text(&read_part(&mut archive, name)?)?);
        }

        debug!(
            "DOCX extracted {} chars ({} header part(s), {} footer part(s))",
            text.len(),
            headers.len(),
            footers.len()
        );
        Ok(text)
    }
}

/// Part names starting with `prefix`, ordered by their numeric suffix
fn part_names<R: Read + Seek>(archive: &ZipArchive<R>, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with(prefix) && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort_by(|a, b| {
        part_number(a, prefix)
            .cmp(&part_number(b, prefix))
            .then_with(|| a.cmp(b))
    });
    names
}

/// `header10.xml` → `Some(10)`; names without a number sort first
fn part_number(name: &str, prefix: &str) -> Option<u32> {
    name.strip_prefix(prefix)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, DocumentError> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| DocumentError::MissingPart(name.to_string()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| DocumentError::Archive(format!("Failed to read {}: {}", name, e)))?;
    Ok(content)
}

/// Convert one WordprocessingML part to plain text
///
/// Only `w:t` inside a run contributes text. Paragraph ends and `w:br`/`w:cr`
/// become newlines and `w:tab` inside a run becomes a tab. Runs nest when a
/// text box (`w:txbxContent`) sits inside a drawing run, so run membership is
/// tracked as a depth.
pub(crate) fn xml_to_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut text = String::new();
    let mut run_depth: usize = 0;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"r" => run_depth += 1,
                b"t" => in_text = run_depth > 0,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" if run_depth > 0 => text.push('\t'),
                b"br" | b"cr" if run_depth > 0 => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let value = e
                    .unescape()
                    .map_err(|err| DocumentError::Xml(err.to_string()))?;
                text.push_str(&value);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "Error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}

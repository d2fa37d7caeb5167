//! PDF page source backed by lopdf.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::Table;

use super::backend::PageSource;
use super::options::ParseOptions;
use super::spans::SpanExtractor;
use super::table_detector::TableDetector;

/// Label used for documents that were not loaded from a file.
const MEMORY_SOURCE: &str = "<memory>";

/// An open PDF document.
///
/// The parsed document is held for as long as the parser lives and is
/// released when it is dropped.
pub struct PdfParser {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    detector: TableDetector,
    options: ParseOptions,
    origin: PathBuf,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        detect_format_from_path(path).map_err(|e| Error::document_open(path, e))?;
        let doc = LopdfDocument::load(path).map_err(|e| Error::document_open(path, e))?;

        Ok(Self::from_document(doc, options, path.to_path_buf()))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data).map_err(|e| Error::document_open(MEMORY_SOURCE, e))?;
        let doc =
            LopdfDocument::load_mem(data).map_err(|e| Error::document_open(MEMORY_SOURCE, e))?;

        Ok(Self::from_document(doc, options, PathBuf::from(MEMORY_SOURCE)))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::document_open(MEMORY_SOURCE, e))?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, options: ParseOptions, origin: PathBuf) -> Self {
        let pages = doc.get_pages();
        log::debug!(
            "opened {} (PDF {}, {} pages)",
            origin.display(),
            doc.version,
            pages.len()
        );

        Self {
            doc,
            pages,
            detector: TableDetector::with_config(options.table_config.clone()),
            options,
            origin,
        }
    }

    /// Where the document was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

impl PageSource for PdfParser {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_tables(&self, page: u32) -> Result<Vec<Table>> {
        let page_id = self.page_id(page)?;
        if !self.options.detect_tables {
            return Ok(Vec::new());
        }

        let spans = SpanExtractor::new(&self.doc).extract_page_spans(page, page_id)?;
        Ok(self.detector.extract_tables(&spans))
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        self.page_id(page)?;
        let text = self
            .doc
            .extract_text(&[page])
            .map_err(|e| Error::extraction(page, e))?;

        // lopdf ends every text object with a line break
        let text = text.trim_end_matches(['\n', '\r']);
        // Whitespace-only text is reported as no text, unlike a plain emptiness check
        Ok((!text.trim().is_empty()).then(|| text.to_string()))
    }
}

impl Drop for PdfParser {
    fn drop(&mut self) {
        log::debug!("closed {}", self.origin.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_empty_data() {
        let result = PdfParser::from_bytes(&[]);
        assert!(matches!(result, Err(Error::DocumentOpen { .. })));
    }

    #[test]
    fn test_from_bytes_not_a_pdf() {
        let result = PdfParser::from_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::DocumentOpen { .. })));
    }

    #[test]
    fn test_open_missing_file() {
        let err = PdfParser::open("/nonexistent/dir/input.pdf")
            .err()
            .expect("missing file must not open");
        match err {
            Error::DocumentOpen { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/input.pdf"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

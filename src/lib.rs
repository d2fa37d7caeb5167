//! # pdfmd
//!
//! Convert a PDF document into page-delimited Markdown.
//!
//! Every page becomes a `## Page N` section holding the page's tables as
//! Markdown pipe-tables followed by its plain text, closed by a horizontal
//! rule.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pdfmd::Result<()> {
//!     let report = pdfmd::convert_file("document.pdf", "document.md")?;
//!     println!("{} pages written", report.stats.page_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Pluggable extraction
//!
//! The converter only needs a [`PageSource`]: page count, tables per page
//! and text per page. [`PdfParser`] provides that on top of `lopdf`; a
//! slice of already-extracted [`PageContent`] works too.
//!
//! ```
//! use pdfmd::{Converter, PageContent, Table};
//!
//! let pages = vec![
//!     PageContent::new(1).with_table(Table::from_text_rows([["X", "Y"], ["1", "2"]])),
//! ];
//! let result = Converter::new().render(&pages)?;
//! assert!(result.content.contains("| X | Y |\n|---|---|\n| 1 | 2 |"));
//! # Ok::<(), pdfmd::Error>(())
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use convert::{ConvertReport, Converter};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf_bytes, PdfFormat};
pub use error::{Error, Result};
pub use model::{Cell, PageContent, Table};
pub use parser::{PageSource, ParseOptions, PdfParser, TableDetectorConfig};
pub use render::{RenderResult, RenderStats};

use std::path::Path;

/// Convert a PDF file to a Markdown file, replacing any existing output.
///
/// # Example
///
/// ```no_run
/// pdfmd::convert_file("document.pdf", "document.md").unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConvertReport> {
    Converter::new().convert(input, output)
}

/// Convert a PDF file to a Markdown string.
///
/// # Example
///
/// ```no_run
/// let markdown = pdfmd::to_markdown("document.pdf").unwrap();
/// assert!(markdown.starts_with("## Page 1"));
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let parser = PdfParser::open(path)?;
    Ok(Converter::new().render(&parser)?.content)
}

/// Convert an in-memory PDF to a Markdown string.
pub fn to_markdown_bytes(data: &[u8]) -> Result<String> {
    Converter::new().convert_bytes(data)
}

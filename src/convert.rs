//! PDF to Markdown conversion.
//!
//! A conversion is a single pass over the pages of a [`PageSource`]: each
//! page is extracted and rendered in order, the whole document is built in
//! memory, and only then is the output file written. Any failure before the
//! write leaves the output path untouched.
//!
//! # Example
//!
//! ```no_run
//! use pdfmd::Converter;
//!
//! fn main() -> pdfmd::Result<()> {
//!     let report = Converter::new().convert("document.pdf", "document.md")?;
//!     println!("{} pages", report.stats.page_count);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{PageSource, ParseOptions, PdfParser};
use crate::render::{MarkdownRenderer, RenderResult, RenderStats};

/// Summary of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Where the Markdown was written
    pub output_path: PathBuf,

    /// Bytes written
    pub bytes_written: usize,

    /// Rendering statistics
    pub stats: RenderStats,
}

/// Converts PDF documents to page-delimited Markdown.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ParseOptions,
}

impl Converter {
    /// Create a converter with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse options used when opening documents.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Convert the PDF at `input` and write the Markdown to `output`,
    /// replacing any existing file.
    pub fn convert<P, Q>(&self, input: P, output: Q) -> Result<ConvertReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        log::info!("converting {}", input.display());

        // The document is closed before the output is touched
        let rendered = {
            let parser = PdfParser::open_with_options(input, self.options.clone())?;
            self.render(&parser)?
        };

        write_output(output.as_ref(), rendered)
    }

    /// Convert an in-memory PDF to Markdown.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<String> {
        let parser = PdfParser::from_bytes_with_options(data, self.options.clone())?;
        Ok(self.render(&parser)?.content)
    }

    /// Render every page of a source, in order.
    pub fn render<S: PageSource + ?Sized>(&self, source: &S) -> Result<RenderResult> {
        let page_count = source.page_count();
        let mut renderer = MarkdownRenderer::new();

        for number in 1..=page_count {
            let page = source.extract_page(number)?;
            log::debug!(
                "page {}/{}: {} tables, {} text",
                number,
                page_count,
                page.tables.len(),
                if page.text.is_some() { "with" } else { "no" }
            );
            renderer.render_page(&page);
        }

        Ok(renderer.finish())
    }

    /// Render a source and write the Markdown to `output`.
    pub fn write_markdown<S, Q>(&self, source: &S, output: Q) -> Result<ConvertReport>
    where
        S: PageSource + ?Sized,
        Q: AsRef<Path>,
    {
        let rendered = self.render(source)?;
        write_output(output.as_ref(), rendered)
    }
}

fn write_output(path: &Path, rendered: RenderResult) -> Result<ConvertReport> {
    fs::write(path, rendered.content.as_bytes()).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "wrote {} ({} pages, {} tables, {} bytes)",
        path.display(),
        rendered.stats.page_count,
        rendered.stats.table_count,
        rendered.content_len()
    );

    Ok(ConvertReport {
        output_path: path.to_path_buf(),
        bytes_written: rendered.content_len(),
        stats: rendered.stats,
    })
}

//! Page source abstraction.
//!
//! The converter only ever asks a document for its page count and, per
//! page, its tables and its text. Anything that can answer those questions
//! can be rendered, which keeps the concrete PDF engine swappable.

use crate::error::{Error, Result};
use crate::model::{PageContent, Table};

/// Per-page extraction capability of an open document.
///
/// Page numbers are 1-based. Implementations report failures as
/// [`Error::Extraction`] (or [`Error::PageOutOfRange`]); the converter
/// never recovers from them.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Tables found on a page, in reading order.
    fn extract_tables(&self, page: u32) -> Result<Vec<Table>>;

    /// Plain text of a page, or `None` when the page has none.
    fn extract_text(&self, page: u32) -> Result<Option<String>>;

    /// Extract tables and text of a page in one go.
    fn extract_page(&self, page: u32) -> Result<PageContent> {
        Ok(PageContent {
            number: page,
            tables: self.extract_tables(page)?,
            text: self.extract_text(page)?,
        })
    }
}

/// Already-extracted pages are a source in their own right.
///
/// Pages are addressed by position, so the slice order defines the page
/// numbering regardless of the `number` field.
impl PageSource for [PageContent] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn extract_tables(&self, page: u32) -> Result<Vec<Table>> {
        Ok(page_at(self, page)?.tables.clone())
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        Ok(page_at(self, page)?.text.clone())
    }
}

impl PageSource for Vec<PageContent> {
    fn page_count(&self) -> u32 {
        self.as_slice().page_count()
    }

    fn extract_tables(&self, page: u32) -> Result<Vec<Table>> {
        self.as_slice().extract_tables(page)
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        self.as_slice().extract_text(page)
    }
}

fn page_at(pages: &[PageContent], page: u32) -> Result<&PageContent> {
    page.checked_sub(1)
        .and_then(|index| pages.get(index as usize))
        .ok_or(Error::PageOutOfRange(page, pages.len() as u32))
}

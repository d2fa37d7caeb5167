//! Page-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// Everything extracted from a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,

    /// Tables in extraction order
    pub tables: Vec<Table>,

    /// Plain text of the page, if any
    pub text: Option<String>,
}

impl PageContent {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Add a table to the page.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Set the page text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check if the page has neither tables nor text.
    pub fn is_blank(&self) -> bool {
        self.tables.is_empty() && self.text.as_deref().map_or(true, str::is_empty)
    }
}

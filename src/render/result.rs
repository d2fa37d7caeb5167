//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering pages, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Counts collected while rendering
    pub stats: RenderStats,
}

impl RenderResult {
    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of pages rendered
    pub page_count: u32,

    /// Number of tables rendered
    pub table_count: u32,

    /// Tables skipped because they had no rows
    pub empty_table_count: u32,

    /// Tables with data rows wider or narrower than the header
    pub ragged_table_count: u32,

    /// Pages that contributed a text block
    pub text_block_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}

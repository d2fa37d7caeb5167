//! Markdown rendering.
//!
//! Output is assembled from fragments: every heading, table line, text
//! block and separator is one fragment, and the document is the fragments
//! joined with `"\n"`. Blank lines in the output come from empty fragments
//! or from fragments that carry their own line breaks.

use crate::model::{Cell, PageContent, Table};

use super::{RenderResult, RenderStats};

/// Horizontal rule closing every page.
const PAGE_SEPARATOR: &str = "\n---\n";

/// Render pages to Markdown.
///
/// ```
/// use pdfmd::{render, PageContent};
///
/// let markdown = render::to_markdown(&[PageContent::new(1).with_text("Hello")]);
/// assert_eq!(markdown, "## Page 1\n\nHello\n\n---\n");
/// ```
pub fn to_markdown(pages: &[PageContent]) -> String {
    let mut renderer = MarkdownRenderer::new();
    for page in pages {
        renderer.render_page(page);
    }
    renderer.finish().content
}

/// Append-only list of output fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentBuffer {
    fragments: Vec<String>,
}

impl FragmentBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Number of fragments so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments in append order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Join the fragments with newlines.
    pub fn join(&self) -> String {
        self.fragments.join("\n")
    }
}

/// Page-by-page Markdown renderer.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    buffer: FragmentBuffer,
    stats: RenderStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one page: heading, tables, text, separator.
    ///
    /// Headings count the pages rendered so far, so the stored
    /// `PageContent::number` never shows up in the output.
    pub fn render_page(&mut self, page: &PageContent) {
        self.stats.page_count += 1;
        let ordinal = self.stats.page_count;
        self.buffer.push(format!("## Page {}\n", ordinal));

        for table in &page.tables {
            self.render_table(ordinal, table);
        }

        if let Some(text) = page.text.as_deref().filter(|t| !t.is_empty()) {
            self.stats.text_block_count += 1;
            self.buffer.push(text);
        }

        self.buffer.push(PAGE_SEPARATOR);
    }

    fn render_table(&mut self, page: u32, table: &Table) {
        if table.is_empty() {
            self.stats.empty_table_count += 1;
            return;
        }
        if table.is_ragged() {
            self.stats.ragged_table_count += 1;
            log::warn!(
                "page {}: table rows differ in width from its {}-column header",
                page,
                table.column_count()
            );
        }

        self.stats.table_count += 1;
        for line in table_lines(table) {
            self.buffer.push(line);
        }
        self.buffer.push("");
    }

    /// The fragments rendered so far.
    pub fn buffer(&self) -> &FragmentBuffer {
        &self.buffer
    }

    /// Join everything into the final document.
    pub fn finish(self) -> RenderResult {
        RenderResult {
            content: self.buffer.join(),
            stats: self.stats,
        }
    }
}

/// Pipe-table lines for a table: header, separator, then one line per data
/// row. An empty table has no lines.
///
/// Each data row uses its own cell count, so a ragged table comes out as
/// ragged Markdown.
pub fn table_lines(table: &Table) -> Vec<String> {
    let Some(header) = table.header() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(table.row_count() + 1);
    lines.push(row_line(header));
    lines.push(separator_line(header.len()));
    lines.extend(table.body().iter().map(|row| row_line(row)));
    lines
}

fn row_line(row: &[Cell]) -> String {
    let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
    format!("| {} |", cells.join(" | "))
}

fn separator_line(columns: usize) -> String {
    format!("|{}|", vec!["---"; columns].join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_line() {
        assert_eq!(
            row_line(&[Some("A".into()), Some("B".into())]),
            "| A | B |"
        );
        assert_eq!(row_line(&[None, Some("B".into())]), "|  | B |");
        assert_eq!(row_line(&[Some(String::new())]), "|  |");
    }

    #[test]
    fn test_separator_line() {
        assert_eq!(separator_line(1), "|---|");
        assert_eq!(separator_line(3), "|---|---|---|");
        assert_eq!(separator_line(0), "||");
    }

    #[test]
    fn test_table_lines() {
        let table = Table::from_text_rows([["A", "B"], ["1", "2"]]);
        assert_eq!(table_lines(&table), vec!["| A | B |", "|---|---|", "| 1 | 2 |"]);
        assert!(table_lines(&Table::new()).is_empty());
    }

    #[test]
    fn test_ragged_rows_keep_their_width() {
        let table = Table::from_rows(vec![
            vec![Some("A".into()), Some("B".into())],
            vec![Some("1".into())],
            vec![Some("x".into()), Some("y".into()), Some("z".into())],
        ]);
        assert_eq!(
            table_lines(&table),
            vec!["| A | B |", "|---|---|", "| 1 |", "| x | y | z |"]
        );
    }

    #[test]
    fn test_page_without_content() {
        let mut renderer = MarkdownRenderer::new();
        renderer.render_page(&PageContent::new(1));
        assert_eq!(renderer.buffer().fragments(), &["## Page 1\n", "\n---\n"]);
        assert_eq!(renderer.finish().content, "## Page 1\n\n\n---\n");
    }

    #[test]
    fn test_headings_number_pages_by_position() {
        let markdown = to_markdown(&[PageContent::new(7), PageContent::new(9)]);
        assert_eq!(markdown, "## Page 1\n\n\n---\n\n## Page 2\n\n\n---\n");
        assert!(!markdown.contains("## Page 7"));
        assert!(!markdown.contains("## Page 9"));
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let mut renderer = MarkdownRenderer::new();
        renderer.render_page(&PageContent::new(1).with_table(Table::new()));
        let result = renderer.finish();
        assert_eq!(result.content, "## Page 1\n\n\n---\n");
        assert_eq!(result.stats.table_count, 0);
        assert_eq!(result.stats.empty_table_count, 1);
    }

    #[test]
    fn test_text_is_verbatim() {
        let page = PageContent::new(1).with_text("*not* | escaped #");
        let markdown = to_markdown(&[page]);
        assert_eq!(markdown, "## Page 1\n\n*not* | escaped #\n\n---\n");
    }

    #[test]
    fn test_empty_text_is_not_rendered() {
        let page = PageContent::new(1).with_text("");
        assert_eq!(to_markdown(&[page]), "## Page 1\n\n\n---\n");
    }

    #[test]
    fn test_stats() {
        let pages = vec![
            PageContent::new(1)
                .with_table(Table::from_text_rows([["A"], ["1"]]))
                .with_table(Table::from_rows(vec![vec![None], vec![None, None]]))
                .with_text("Hello"),
            PageContent::new(2),
        ];
        let mut renderer = MarkdownRenderer::new();
        for page in &pages {
            renderer.render_page(page);
        }
        let stats = renderer.finish().stats;
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.table_count, 2);
        assert_eq!(stats.ragged_table_count, 1);
        assert_eq!(stats.text_block_count, 1);
    }
}

//! Table detection from text positions (stream mode).
//!
//! Tables are found without ruling lines: spans are grouped into rows by
//! baseline, column edges are the left edges that line up across rows, and
//! runs of consecutive rows that hit those edges become tables.

use std::collections::{HashMap, HashSet};

use crate::model::{Cell, Table};

use super::spans::TextSpan;

/// A table region found on a page.
#[derive(Debug, Clone)]
pub struct DetectedTable {
    /// Right X boundary
    pub right_x: f32,
    /// Column left edges, ascending
    pub columns: Vec<f32>,
    /// Rows from top to bottom
    pub rows: Vec<TableRowData>,
}

/// A row of text spans in a table.
#[derive(Debug, Clone)]
pub struct TableRowData {
    /// Average baseline of this row
    pub y: f32,
    /// Spans in this row, sorted by X
    pub spans: Vec<TextSpan>,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Bucket width for grouping left edges.
const EDGE_BUCKET: f32 = 5.0;

/// Distance within which a span counts as aligned to a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Slack allowed for spans starting slightly left of their column.
const COLUMN_SLACK: f32 = 10.0;

/// Detects tables in the text spans of a page.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables and convert them to grids, top of the page first.
    pub fn extract_tables(&self, spans: &[TextSpan]) -> Vec<Table> {
        self.detect(spans)
            .iter()
            .map(|detected| self.to_table(detected))
            .collect()
    }

    /// Detect table regions in the given spans.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<DetectedTable> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            log::debug!("TableDetector: not enough spans ({})", spans.len());
            return vec![];
        }

        let rows = self.group_into_rows(spans);
        if rows.len() < self.config.min_rows {
            log::debug!("TableDetector: not enough rows ({})", rows.len());
            return vec![];
        }

        let columns = self.detect_columns(&rows);
        if columns.len() < self.config.min_columns {
            log::debug!("TableDetector: not enough columns ({:?})", columns);
            return vec![];
        }

        let mut tables = Vec::new();
        for (start, end) in self.find_table_regions(&rows, &columns) {
            let table_rows = rows[start..=end].to_vec();

            // Columns are re-detected per region; the page-wide edges can
            // include stray alignments from outside the table.
            let table_columns = self.detect_columns(&table_rows);

            if table_columns.len() < self.config.min_columns {
                continue;
            }
            if table_columns.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    table_columns.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_list_pattern(&table_rows, &table_columns) {
                log::debug!("TableDetector: skipping region, detected as list pattern");
                continue;
            }

            let right_x = table_rows
                .iter()
                .flat_map(|r| r.spans.iter())
                .map(TextSpan::right)
                .fold(f32::MIN, f32::max);

            tables.push(DetectedTable {
                right_x,
                columns: table_columns,
                rows: table_rows,
            });
        }

        log::debug!("TableDetector: {} tables", tables.len());
        tables
    }

    /// Group spans into rows by baseline, top of the page first.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<TableRowData> {
        let mut sorted = spans.to_vec();
        // PDF Y grows upwards
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<TableRowData> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match current_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(make_row(std::mem::take(&mut current)));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            rows.push(make_row(current));
        }

        rows
    }

    /// Find left edges shared by enough rows.
    ///
    /// Rows with at least two spans are the evidence; when too few rows
    /// have two spans, every row counts.
    fn detect_columns(&self, rows: &[TableRowData]) -> Vec<f32> {
        let multi_span_rows: Vec<&TableRowData> =
            rows.iter().filter(|r| r.spans.len() >= 2).collect();

        let evidence: Vec<&TableRowData> = if multi_span_rows.len() >= self.config.min_rows {
            multi_span_rows
        } else {
            rows.iter().collect()
        };
        if evidence.is_empty() {
            return vec![];
        }

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &evidence {
            // Count each bucket once per row
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|span| (span.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((evidence.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(f32::total_cmp);

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            if merged
                .last()
                .map_or(true, |&last| edge - last >= self.config.min_column_gap)
            {
                merged.push(edge);
            }
        }
        merged
    }

    /// Find runs of consecutive aligned rows long enough to be tables.
    fn find_table_regions(&self, rows: &[TableRowData], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            let aligned = alignment_score(row, columns) >= self.config.min_alignment_ratio;
            match (aligned, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if i - s >= self.config.min_rows {
                        regions.push((s, i - 1));
                    }
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }

        regions
    }

    /// Convert a detected region to a grid.
    ///
    /// The first row is the header. Each span lands in exactly one column;
    /// a column that receives nothing in a row is an absent cell.
    pub fn to_table(&self, detected: &DetectedTable) -> Table {
        let columns = &detected.columns;
        let mut table = Table::new();

        for row in &detected.rows {
            let mut contents: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
            for span in &row.spans {
                let col = find_column_for_span(span.x, columns, detected.right_x);
                if let Some(cell) = contents.get_mut(col) {
                    cell.push(span.text.trim());
                }
            }

            let cells: Vec<Cell> = contents
                .into_iter()
                .map(|parts| {
                    let text = parts.join(" ");
                    (!text.is_empty()).then_some(text)
                })
                .collect();
            table.add_row(cells);
        }

        table
    }

    /// Check if a region is really a bulleted or numbered list.
    ///
    /// List markers usually come out as separate spans from the item text,
    /// which looks like a two-column table.
    fn is_list_pattern(&self, rows: &[TableRowData], columns: &[f32]) -> bool {
        if columns.len() < 2 || rows.is_empty() {
            return false;
        }

        let mut bullet_count = 0;
        let mut number_count = 0;

        for row in rows {
            // Rows are sorted by X, so the first span is the leftmost
            let Some(first) = row.spans.first() else {
                continue;
            };
            let text = first.text.trim();
            if is_bullet_marker(text) {
                bullet_count += 1;
            } else if is_number_marker(text) {
                number_count += 1;
            }
        }

        let bullet_ratio = bullet_count as f32 / rows.len() as f32;
        let marker_ratio = (bullet_count + number_count) as f32 / rows.len() as f32;

        // Numbered first columns are common in real tables, so numbers only
        // disqualify two-column regions.
        bullet_ratio >= 0.5 || (columns.len() == 2 && marker_ratio >= 0.5)
    }
}

fn make_row(spans: Vec<TextSpan>) -> TableRowData {
    let y = spans.iter().map(|s| s.y).sum::<f32>() / spans.len() as f32;
    TableRowData { y, spans }
}

/// Fraction of a row's spans that start on a column edge.
fn alignment_score(row: &TableRowData, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }

    let aligned = row
        .spans
        .iter()
        .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= ALIGN_TOLERANCE))
        .count();

    aligned as f32 / row.spans.len() as f32
}

/// Column index for a span's left edge, falling back to the nearest edge.
fn find_column_for_span(span_x: f32, columns: &[f32], right_x: f32) -> usize {
    for (i, &col_start) in columns.iter().enumerate() {
        let col_end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if span_x >= col_start - COLUMN_SLACK && span_x < col_end - COLUMN_SLACK {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (span_x - **a).abs().total_cmp(&(span_x - **b).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "▹" | "►" | "■" | "●" | "※"
            | "□" | "◆" | "◇" | "▶" | "▷" | "☞" | "➤" | "➜"
    )
}

/// Number-style list markers: "1.", "2)", "3", "a.", "B)".
fn is_number_marker(text: &str) -> bool {
    // Internal whitespace is dropped so "1 ." still matches
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text, x, y, 12.0)
    }

    fn cells(row: &[Cell]) -> Vec<&str> {
        row.iter().map(|c| c.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn test_group_into_rows() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("B1", 60.0, 100.0),
            make_span("A2", 10.0, 85.0),
            make_span("A1", 10.0, 100.0),
            make_span("B2", 60.0, 85.0),
        ];

        let rows = detector.group_into_rows(&spans);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[0].text, "A1");
        assert_eq!(rows[0].spans[1].text, "B1");
        assert_eq!(rows[1].spans[0].text, "A2");
    }

    #[test]
    fn test_detect_columns() {
        let detector = TableDetector::new();
        let rows: Vec<TableRowData> = [100.0, 85.0, 70.0]
            .iter()
            .map(|&y| make_row(vec![make_span("A", 10.0, y), make_span("B", 60.0, y)]))
            .collect();

        assert_eq!(detector.detect_columns(&rows), vec![10.0, 60.0]);
    }

    #[test]
    fn test_extract_simple_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Name", 10.0, 100.0),
            make_span("Age", 80.0, 100.0),
            make_span("Alice", 10.0, 85.0),
            make_span("30", 80.0, 85.0),
            make_span("Bob", 10.0, 70.0),
            make_span("25", 80.0, 70.0),
        ];

        let tables = detector.extract_tables(&spans);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.row_count(), 3);
        assert_eq!(cells(table.header().unwrap()), vec!["Name", "Age"]);
        assert_eq!(cells(&table.body()[1]), vec!["Bob", "25"]);
    }

    #[test]
    fn test_missing_cell_is_none() {
        let detector = TableDetector::new();
        let detected = DetectedTable {
            right_x: 120.0,
            columns: vec![10.0, 80.0],
            rows: vec![
                make_row(vec![make_span("Name", 10.0, 100.0), make_span("Age", 80.0, 100.0)]),
                make_row(vec![make_span("30", 80.0, 85.0)]),
            ],
        };

        let table = detector.to_table(&detected);
        assert_eq!(table.body()[0], vec![None, Some("30".to_string())]);
    }

    #[test]
    fn test_no_table_single_column() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Line 1", 10.0, 100.0),
            make_span("Line 2", 10.0, 85.0),
            make_span("Line 3", 10.0, 70.0),
            make_span("Line 4", 10.0, 55.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_numbered_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("1.", 50.0, 400.0),
            make_span("Device settings", 80.0, 400.0),
            make_span("2.", 50.0, 370.0),
            make_span("Object management", 80.0, 370.0),
            make_span("3.", 50.0, 340.0),
            make_span("Routing policy", 80.0, 340.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_bullet_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("-", 50.0, 400.0),
            make_span("Management", 80.0, 400.0),
            make_span("-", 50.0, 370.0),
            make_span("Interface/Service Option", 80.0, 370.0),
            make_span("-", 50.0, 340.0),
            make_span("Firmware", 80.0, 340.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let detector = TableDetector::with_config(TableDetectorConfig {
            max_columns: 2,
            ..TableDetectorConfig::default()
        });
        let mut spans = Vec::new();
        for y in [100.0, 85.0, 70.0] {
            for x in [10.0, 60.0, 110.0] {
                spans.push(make_span("cell", x, y));
            }
        }

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_list_markers() {
        assert!(is_number_marker("1."));
        assert!(is_number_marker("12."));
        assert!(is_number_marker("1)"));
        assert!(is_number_marker("1 ."));
        assert!(is_number_marker("3"));
        assert!(is_number_marker("a."));
        assert!(is_number_marker("B)"));
        assert!(is_bullet_marker("•"));
        assert!(is_bullet_marker("-"));

        assert!(!is_number_marker("Name"));
        assert!(!is_number_marker("X"));
        assert!(!is_number_marker(""));
        assert!(!is_bullet_marker("Alice"));
    }
}

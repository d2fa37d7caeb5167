//! Parsing options and configuration.

use super::TableDetectorConfig;

/// Options for extracting content from PDF pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Whether to run table detection at all
    pub detect_tables: bool,

    /// Thresholds for the table detector
    pub table_config: TableDetectorConfig,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Extract text only (no tables).
    pub fn text_only(self) -> Self {
        self.with_tables(false)
    }

    /// Set table detector thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            detect_tables: true,
            table_config: TableDetectorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.detect_tables);
        assert_eq!(options.table_config, TableDetectorConfig::default());
    }

    #[test]
    fn test_parse_options_builder() {
        let config = TableDetectorConfig {
            max_columns: 10,
            ..TableDetectorConfig::default()
        };
        let options = ParseOptions::new().text_only().with_table_config(config);

        assert!(!options.detect_tables);
        assert_eq!(options.table_config.max_columns, 10);
    }
}

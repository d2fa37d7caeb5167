//! PDF parsing module.
//!
//! [`PageSource`] is the only thing the converter depends on;
//! [`PdfParser`] is the lopdf-backed implementation.

mod backend;
mod options;
mod pdf_parser;
mod spans;
mod table_detector;

pub use backend::PageSource;
pub use options::ParseOptions;
pub use pdf_parser::PdfParser;
pub use spans::{SpanExtractor, TextSpan};
pub use table_detector::{DetectedTable, TableDetector, TableDetectorConfig, TableRowData};

//! Error types for pdfmd.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be opened or parsed as a PDF document.
    #[error("Cannot open PDF '{}': {reason}", path.display())]
    DocumentOpen {
        /// Path (or `<memory>`) of the input
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Table or text extraction failed on a page.
    #[error("Extraction failed on page {page}: {message}")]
    Extraction {
        /// 1-based page number
        page: u32,
        /// Underlying cause
        message: String,
    },

    /// The Markdown output could not be written.
    #[error("Cannot write '{}': {source}", path.display())]
    FileWrite {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The data is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a malformed version.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a [`Error::DocumentOpen`] for the given input.
    pub fn document_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::DocumentOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`Error::Extraction`] for the given page.
    pub fn extraction(page: u32, message: impl ToString) -> Self {
        Error::Extraction {
            page,
            message: message.to_string(),
        }
    }
}

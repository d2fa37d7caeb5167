//! Extraction model shared by the parser and the renderer.
//!
//! A page is reduced to what ends up in the Markdown output: its tables as
//! grids of optional strings, and its plain text.

mod page;
mod table;

pub use page::PageContent;
pub use table::{Cell, Table};

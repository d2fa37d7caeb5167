//! Rendering module for turning extracted pages into Markdown.

mod markdown;
mod result;

pub use markdown::{table_lines, to_markdown, FragmentBuffer, MarkdownRenderer};
pub use result::{RenderResult, RenderStats};

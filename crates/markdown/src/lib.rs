//! Classification and rendering of the lightly marked-up advisory text that
//! fills the precautions section of a report.
//!
//! Only a handful of line forms are recognized (headings, numbered and
//! bulleted items with bold labels, plain bullets and `**bold**` spans).
//! Everything else renders as plain text.

pub mod classifier;
pub mod renderer;

pub use classifier::{InlineSegment, MarkdownNode, classify_document, classify_line};
pub use renderer::{MarkdownRenderer, MarkdownStats};

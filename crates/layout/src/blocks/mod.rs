//! Drawable report blocks.
//!
//! Every block knows its height before it is drawn so the caller (or the
//! block itself, line by line) can decide on page breaks first. Blocks are
//! built from a data snapshot, never mutated, and dropped after drawing.

mod banner;
mod field;
mod header;
mod status;
mod table;

pub use banner::{format_confidence, ResultBanner};
pub use field::LabeledField;
pub use header::SectionHeader;
pub use status::{StatusBox, Tone};
pub use table::{TableRow, TwoColumnTable, TABLE_TRAILING_GAP};

use crate::cursor::LayoutState;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::Canvas;

pub trait ContentBlock {
    /// Vertical space the block consumes when drawn without a page break,
    /// at the given content width.
    fn estimate_height(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> f32;

    /// Draws the block at the cursor, breaking pages as needed, and leaves
    /// the cursor just below it.
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError>;
}

/// Vertical offset that centers a line of text of `size` inside a band of `height`.
pub(crate) fn center_offset(height: f32, size: f32) -> f32 {
    ((height - size) / 2.0).max(0.0)
}

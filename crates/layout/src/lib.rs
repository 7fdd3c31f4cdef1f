use medreport_canvas::CanvasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Canvas operation failed: {0}")]
    Canvas(#[from] CanvasError),
}

pub mod algorithms;
pub mod blocks;
pub mod cursor;
pub mod text;
pub mod theme;

pub use self::blocks::{
    ContentBlock, LabeledField, ResultBanner, SectionHeader, StatusBox, TableRow, Tone,
    TwoColumnTable,
};
pub use self::cursor::LayoutState;
pub use self::text::{InlineBuilder, InlineLine, InlineToken, PositionedRun, flow_inline, wrap_text};
pub use self::theme::Theme;

pub use medreport_types::{Color, PageGeometry, Rect, Size};

#[cfg(test)]
mod test_utils;
